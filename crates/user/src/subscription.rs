use creatorhub_db::table::Subscription as SubscriptionTable;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{Subscription, SubscriptionStatus};

pub struct CreateInput {
    pub sender_user_id: String,
    pub recipient_user_id: String,
    pub provider: String,
    pub expires_at: i64,
}

pub async fn create(pool: &SqlitePool, input: CreateInput) -> creatorhub_shared::Result<String> {
    let id = Ulid::new().to_string();
    let statement = Query::insert()
        .into_table(SubscriptionTable::Table)
        .columns([
            SubscriptionTable::Id,
            SubscriptionTable::SenderUserId,
            SubscriptionTable::RecipientUserId,
            SubscriptionTable::Provider,
            SubscriptionTable::Status,
            SubscriptionTable::ExpiresAt,
            SubscriptionTable::CreatedAt,
        ])
        .values_panic([
            id.to_owned().into(),
            input.sender_user_id.into(),
            input.recipient_user_id.into(),
            input.provider.into(),
            SubscriptionStatus::Active.to_string().into(),
            input.expires_at.into(),
            OffsetDateTime::now_utc().unix_timestamp().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(id)
}

pub async fn find(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> creatorhub_shared::Result<Option<Subscription>> {
    let statement = Query::select()
        .columns([
            SubscriptionTable::Id,
            SubscriptionTable::SenderUserId,
            SubscriptionTable::RecipientUserId,
            SubscriptionTable::Provider,
            SubscriptionTable::Status,
            SubscriptionTable::ExpiresAt,
        ])
        .from(SubscriptionTable::Table)
        .and_where(Expr::col(SubscriptionTable::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Subscription, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

/// Subscriptions the user pays for that are still running.
pub async fn active_by_sender(
    pool: &SqlitePool,
    user_id: impl Into<String>,
) -> creatorhub_shared::Result<Vec<Subscription>> {
    let statement = Query::select()
        .columns([
            SubscriptionTable::Id,
            SubscriptionTable::SenderUserId,
            SubscriptionTable::RecipientUserId,
            SubscriptionTable::Provider,
            SubscriptionTable::Status,
            SubscriptionTable::ExpiresAt,
        ])
        .from(SubscriptionTable::Table)
        .and_where(Expr::col(SubscriptionTable::SenderUserId).eq(user_id.into()))
        .and_where(Expr::col(SubscriptionTable::Status).eq(SubscriptionStatus::Active.as_ref()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Subscription, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub async fn set_status(
    pool: &SqlitePool,
    id: impl Into<String>,
    from: SubscriptionStatus,
    to: SubscriptionStatus,
) -> creatorhub_shared::Result<bool> {
    let statement = Query::update()
        .table(SubscriptionTable::Table)
        .value(SubscriptionTable::Status, to.as_ref())
        .and_where(Expr::col(SubscriptionTable::Id).eq(id.into()))
        .and_where(Expr::col(SubscriptionTable::Status).eq(from.as_ref()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected() > 0)
}
