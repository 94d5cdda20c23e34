use creatorhub_db::table::Setting;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

/// Read access to the application settings, keyed by dotted names such as
/// `referrals.enabled`.
#[async_trait::async_trait]
pub trait Settings: Send + Sync {
    async fn get(&self, key: &str) -> crate::Result<Option<String>>;

    /// A setting is enabled when it holds a non-empty value other than `0` or `false`.
    async fn enabled(&self, key: &str) -> crate::Result<bool> {
        Ok(self.get(key).await?.as_deref().is_some_and(is_truthy))
    }

    async fn number(&self, key: &str) -> crate::Result<Option<f64>> {
        let Some(value) = self.get(key).await? else {
            return Ok(None);
        };

        match value.trim().parse::<f64>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                tracing::warn!(key, value = %value, "setting is not a number, ignoring");
                Ok(None)
            }
        }
    }
}

pub fn is_truthy(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false")
}

#[derive(Clone)]
pub struct SqliteSettings(pub SqlitePool);

impl SqliteSettings {
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) -> crate::Result<()> {
        let key: String = key.into();
        let value: String = value.into();
        let statement = Query::insert()
            .into_table(Setting::Table)
            .columns([Setting::Key, Setting::Value])
            .values_panic([key.into(), value.into()])
            .on_conflict(
                OnConflict::column(Setting::Key)
                    .update_column(Setting::Value)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }

    pub async fn remove(&self, key: &str) -> crate::Result<()> {
        let statement = Query::delete()
            .from_table(Setting::Table)
            .and_where(Expr::col(Setting::Key).eq(key))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl Settings for SqliteSettings {
    async fn get(&self, key: &str) -> crate::Result<Option<String>> {
        let statement = Query::select()
            .column(Setting::Value)
            .from(Setting::Table)
            .and_where(Expr::col(Setting::Key).eq(key))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        Ok(row.map(|(value,)| value))
    }
}
