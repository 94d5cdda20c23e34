use creatorhub_db::table::UserDevice;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sha3::{Digest, Sha3_256};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

/// Hex encoded SHA3-256 of the user agent and ip the device registered from.
pub fn device_signature(user_agent: &str, ip: &str) -> String {
    let mut hasher = Sha3_256::new();
    hasher.update(user_agent.as_bytes());
    hasher.update(b"|");
    hasher.update(ip.as_bytes());

    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[derive(Clone)]
pub struct SqliteDeviceService(pub SqlitePool);

impl SqliteDeviceService {
    pub async fn count(&self, user_id: &str) -> creatorhub_shared::Result<usize> {
        let statement = Query::select()
            .column(UserDevice::Id)
            .from(UserDevice::Table)
            .and_where(Expr::col(UserDevice::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.len())
    }
}

#[async_trait::async_trait]
impl super::DeviceService for SqliteDeviceService {
    async fn add_user_device(
        &self,
        user_id: &str,
        signature: &str,
        verified: bool,
    ) -> creatorhub_shared::Result<()> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let verified_at = verified.then_some(now);

        let statement = Query::insert()
            .into_table(UserDevice::Table)
            .columns([
                UserDevice::Id,
                UserDevice::UserId,
                UserDevice::Signature,
                UserDevice::VerifiedAt,
                UserDevice::CreatedAt,
            ])
            .values_panic([
                Ulid::new().to_string().into(),
                user_id.into(),
                signature.into(),
                verified_at.into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(user_id, verified, "user device registered");

        Ok(())
    }
}
