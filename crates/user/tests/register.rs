use creatorhub_user::{CreateUserInput, HookContext, NoopObserver};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn validate_unique_emails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let repository = helpers::repository(&state, NoopObserver);
    repository
        .create(
            CreateUserInput {
                email: "john.doe@creatorhub.localhost".to_owned(),
                username: "john".to_owned(),
            },
            &mut HookContext::default(),
        )
        .await?;

    let user_2 = repository
        .create(
            CreateUserInput {
                email: "john.doe@creatorhub.localhost".to_owned(),
                username: "johnny".to_owned(),
            },
            &mut HookContext::default(),
        )
        .await;

    assert_eq!(
        user_2.unwrap_err().to_string(),
        "Email already exists".to_owned()
    );

    let user_3 = repository
        .create(
            CreateUserInput {
                email: "JOHN.Doe@CreatorHub.localhost".to_owned(),
                username: "johnd".to_owned(),
            },
            &mut HookContext::default(),
        )
        .await;

    assert!(matches!(user_3, Err(creatorhub_shared::Error::User(_))));
    assert!(
        repository
            .find_by_email("John.Doe@creatorhub.LOCALHOST")
            .await?
            .is_some()
    );

    Ok(())
}

#[tokio::test]
async fn validate_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let repository = helpers::repository(&state, NoopObserver);

    let res = repository
        .create(
            CreateUserInput {
                email: "not-an-email".to_owned(),
                username: "jo".to_owned(),
            },
            &mut HookContext::default(),
        )
        .await;

    assert!(matches!(res, Err(creatorhub_shared::Error::Validate(_))));
    assert!(
        repository
            .find_by_email("not-an-email")
            .await?
            .is_none()
    );

    Ok(())
}

#[tokio::test]
async fn generates_referral_code() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let repository = helpers::repository(&state, NoopObserver);
    let john = helpers::create_user(&repository, "john").await?;
    let albert = helpers::create_user(&repository, "albert").await?;

    let john_code = john.referral_code.clone().unwrap();
    assert_eq!(john_code.len(), 8);
    assert_ne!(john.referral_code, albert.referral_code);

    let found = creatorhub_user::find(
        &state.pool,
        creatorhub_user::FindType::ReferralCode(john_code),
    )
    .await?;
    assert_eq!(found.map(|u| u.id), Some(john.id));

    Ok(())
}
