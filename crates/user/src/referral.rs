use creatorhub_db::table::ReferralCodeUsage;
use sea_query::{Expr, ExprTrait, Func, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

pub async fn exists(
    pool: &SqlitePool,
    used_by: impl Into<String>,
    referral_code: impl Into<String>,
) -> creatorhub_shared::Result<bool> {
    let statement = Query::select()
        .column(ReferralCodeUsage::Id)
        .from(ReferralCodeUsage::Table)
        .and_where(Expr::col(ReferralCodeUsage::UsedBy).eq(used_by.into()))
        .and_where(Expr::col(ReferralCodeUsage::ReferralCode).eq(referral_code.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn create(
    pool: &SqlitePool,
    used_by: impl Into<String>,
    referral_code: impl Into<String>,
) -> creatorhub_shared::Result<String> {
    let id = Ulid::new().to_string();
    let used_by: String = used_by.into();
    let referral_code: String = referral_code.into();
    let statement = Query::insert()
        .into_table(ReferralCodeUsage::Table)
        .columns([
            ReferralCodeUsage::Id,
            ReferralCodeUsage::UsedBy,
            ReferralCodeUsage::ReferralCode,
            ReferralCodeUsage::CreatedAt,
        ])
        .values_panic([
            id.to_owned().into(),
            used_by.into(),
            referral_code.into(),
            OffsetDateTime::now_utc().unix_timestamp().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(id)
}

pub async fn count_by_code(
    pool: &SqlitePool,
    referral_code: impl Into<String>,
) -> creatorhub_shared::Result<i64> {
    let statement = Query::select()
        .expr(Func::count(Expr::col(ReferralCodeUsage::Id)))
        .from(ReferralCodeUsage::Table)
        .and_where(Expr::col(ReferralCodeUsage::ReferralCode).eq(referral_code.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
