use creatorhub_db::table::Wallet;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::User;

#[derive(Clone)]
pub struct SqliteWalletService(pub SqlitePool);

impl SqliteWalletService {
    pub async fn total(&self, user_id: impl Into<String>) -> creatorhub_shared::Result<Option<f64>> {
        let statement = Query::select()
            .column(Wallet::Total)
            .from(Wallet::Table)
            .and_where(Expr::col(Wallet::UserId).eq(user_id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (f64,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        Ok(row.map(|(total,)| total))
    }
}

#[async_trait::async_trait]
impl super::WalletService for SqliteWalletService {
    async fn create_user_wallet(&self, user: &User) -> creatorhub_shared::Result<()> {
        let statement = Query::insert()
            .into_table(Wallet::Table)
            .columns([Wallet::Id, Wallet::UserId, Wallet::Total, Wallet::CreatedAt])
            .values_panic([
                Ulid::new().to_string().into(),
                user.id.to_owned().into(),
                0.0_f64.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }
}
