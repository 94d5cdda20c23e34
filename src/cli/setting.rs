use anyhow::Result;
use creatorhub::config::Config;
use creatorhub_shared::{Settings, SqliteSettings};

pub async fn set_setting(config: Config, key: String, value: String) -> Result<()> {
    let pool = creatorhub::create_pool(&config.database.url, 1).await?;
    SqliteSettings(pool).set(&key, &value).await?;

    tracing::info!("{key} set to {value}");

    Ok(())
}

pub async fn get_setting(config: Config, key: String) -> Result<()> {
    let pool = creatorhub::create_pool(&config.database.url, 1).await?;

    match SqliteSettings(pool).get(&key).await? {
        Some(value) => println!("{value}"),
        None => tracing::warn!("{key} is not set"),
    }

    Ok(())
}
