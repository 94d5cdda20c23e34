use std::str::FromStr;

use creatorhub_db::{Migrate, Plan};
use creatorhub_message::{PpvPriceRange, PriceContext, SaveMessageInput};
use creatorhub_shared::SqliteSettings;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use temp_dir::TempDir;

async fn setup_settings(dir: &TempDir) -> anyhow::Result<SqliteSettings> {
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    creatorhub_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(SqliteSettings(pool))
}

fn input(price: &str) -> SaveMessageInput {
    SaveMessageInput {
        price: Some(price.to_owned()),
    }
}

#[tokio::test]
async fn default_bounds() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let settings = setup_settings(&dir).await?;

    assert!(input("1").authorize());
    assert_eq!(input("1").validate_with(&settings).await?, Some(1.0));
    assert_eq!(input("500").validate_with(&settings).await?, Some(500.0));
    assert!(input("0.5").validate_with(&settings).await.is_err());
    assert!(input("501").validate_with(&settings).await.is_err());

    Ok(())
}

#[tokio::test]
async fn missing_price_passes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let settings = setup_settings(&dir).await?;
    settings.set("payments.min_ppv_message_price", "10").await?;

    assert_eq!(
        SaveMessageInput::default().validate_with(&settings).await?,
        None
    );
    assert_eq!(input("  ").validate_with(&settings).await?, None);

    Ok(())
}

#[tokio::test]
async fn configured_bounds() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let settings = setup_settings(&dir).await?;
    settings.set("payments.min_ppv_message_price", "5").await?;
    settings.set("payments.max_ppv_message_price", "20").await?;
    settings.set("payments.max_ppv_post_price", "1000").await?;

    let err = input("25").validate_with(&settings).await.unwrap_err();
    let creatorhub_shared::Error::Validate(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    let field_errors = errors.field_errors();
    let price = &field_errors["price"][0];
    assert_eq!(price.code, "ppv_min_max");
    assert_eq!(price.params["min"], serde_json::json!(5.0));
    assert_eq!(price.params["max"], serde_json::json!(20.0));

    assert_eq!(input("20").validate_with(&settings).await?, Some(20.0));

    let post = PpvPriceRange::load(&settings, PriceContext::Post).await?;
    assert_eq!(post.min, 1.0);
    assert_eq!(post.max, 1000.0);

    Ok(())
}

#[tokio::test]
async fn ignore_unparsable_bounds() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let settings = setup_settings(&dir).await?;
    settings.set("payments.max_ppv_message_price", "lots").await?;

    let range = PpvPriceRange::load(&settings, PriceContext::Message).await?;
    assert_eq!(range, PpvPriceRange::new(PriceContext::Message));

    Ok(())
}
