use std::sync::Arc;

use creatorhub_user::{
    HookContext, ListType, NoopObserver, REFERRALS_AUTO_FOLLOW, REFERRALS_ENABLED, UserObserver,
    referral, services::SqliteListService,
};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn record_referral_once() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    state.settings.set(REFERRALS_ENABLED, "1").await?;

    let plain = helpers::repository(&state, NoopObserver);
    let anna = helpers::create_user(&plain, "anna").await?;
    let john = helpers::create_user(&plain, "john").await?;
    let code = anna.referral_code.clone().unwrap();

    let lists = helpers::RecordingLists::default();
    let observer = helpers::observer(&state)
        .wallets(Arc::new(helpers::NoopWallets))
        .lists(Arc::new(lists.clone()));

    let mut context = HookContext::referral(&code);
    observer.created(&john, &mut context).await?;
    assert!(context.forget_referral);

    let mut context = HookContext::referral(&code);
    observer.created(&john, &mut context).await?;
    assert!(!context.forget_referral);

    assert_eq!(referral::count_by_code(&state.pool, &code).await?, 1);
    assert!(referral::exists(&state.pool, &john.id, &code).await?);
    assert!(lists.0.lock().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn auto_follow_referrer() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    state.settings.set(REFERRALS_ENABLED, "1").await?;
    state.settings.set(REFERRALS_AUTO_FOLLOW, "1").await?;

    let plain = helpers::repository(&state, NoopObserver);
    let anna = helpers::create_user(&plain, "anna").await?;

    let repository = helpers::repository(&state, helpers::observer(&state));
    let mut context = HookContext::referral(anna.referral_code.clone().unwrap());
    let john = repository
        .create(
            creatorhub_user::CreateUserInput {
                email: "john@creatorhub.localhost".to_owned(),
                username: "john".to_owned(),
            },
            &mut context,
        )
        .await?;

    assert!(context.forget_referral);

    let lists = SqliteListService(state.pool.clone());
    assert_eq!(
        lists.members(&john.id, ListType::Following).await?,
        vec![anna.id]
    );

    Ok(())
}

#[tokio::test]
async fn ignore_referral_when_disabled() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    state.settings.set(REFERRALS_ENABLED, "false").await?;

    let plain = helpers::repository(&state, NoopObserver);
    let anna = helpers::create_user(&plain, "anna").await?;
    let john = helpers::create_user(&plain, "john").await?;
    let code = anna.referral_code.clone().unwrap();

    let observer = helpers::observer(&state)
        .wallets(Arc::new(helpers::NoopWallets))
        .lists(Arc::new(helpers::RecordingLists::default()));
    let mut context = HookContext::referral(&code);
    observer.created(&john, &mut context).await?;

    assert!(!context.forget_referral);
    assert_eq!(referral::count_by_code(&state.pool, &code).await?, 0);

    Ok(())
}

#[tokio::test]
async fn ignore_unknown_referral_code() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    state.settings.set(REFERRALS_ENABLED, "1").await?;

    let repository = helpers::repository(&state, helpers::observer(&state));
    let mut context = HookContext::referral("ZZZZZZZZ");
    repository
        .create(
            creatorhub_user::CreateUserInput {
                email: "john@creatorhub.localhost".to_owned(),
                username: "john".to_owned(),
            },
            &mut context,
        )
        .await?;

    assert!(!context.forget_referral);
    assert_eq!(referral::count_by_code(&state.pool, "ZZZZZZZZ").await?, 0);

    Ok(())
}
