use std::sync::Arc;

use creatorhub_db::table::User as UserTable;
use sea_query::{Expr, ExprTrait, Func, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::{CreateUserInput, HookContext, User, UserChanges, UserObserver};

pub enum FindType {
    Id(String),
    Email(String),
    ReferralCode(String),
}

fn select_user() -> SelectStatement {
    Query::select()
        .columns([
            UserTable::Id,
            UserTable::Email,
            UserTable::Username,
            UserTable::Avatar,
            UserTable::Cover,
            UserTable::ReferralCode,
            UserTable::CreatedAt,
        ])
        .from(UserTable::Table)
        .to_owned()
}

pub async fn find(pool: &SqlitePool, arg_type: FindType) -> creatorhub_shared::Result<Option<User>> {
    let mut statement = select_user().limit(1).to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(UserTable::Id).eq(id)),
        // ASCII case folding, same as the `NOCASE` unique index on email.
        FindType::Email(email) => statement.and_where(
            Expr::expr(Func::lower(Expr::col(UserTable::Email))).eq(email.to_ascii_lowercase()),
        ),
        FindType::ReferralCode(code) => {
            statement.and_where(Expr::col(UserTable::ReferralCode).eq(code))
        }
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, User, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

/// Eight characters from the random part of a fresh ULID.
fn generate_referral_code() -> String {
    Ulid::new()
        .to_string()
        .chars()
        .rev()
        .take(8)
        .collect()
}

/// Persists users and runs the registered [`UserObserver`] around each write.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
    observer: Arc<dyn UserObserver>,
}

impl UserRepository {
    pub fn new(pool: SqlitePool, observer: Arc<dyn UserObserver>) -> Self {
        Self { pool, observer }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn find(&self, id: impl Into<String>) -> creatorhub_shared::Result<Option<User>> {
        find(&self.pool, FindType::Id(id.into())).await
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> creatorhub_shared::Result<Option<User>> {
        find(&self.pool, FindType::Email(email.into())).await
    }

    pub async fn create(
        &self,
        input: CreateUserInput,
        context: &mut HookContext,
    ) -> creatorhub_shared::Result<User> {
        input.validate()?;

        if self.find_by_email(&input.email).await?.is_some() {
            creatorhub_shared::user!("Email already exists");
        }

        let user = User {
            id: Ulid::new().to_string(),
            email: input.email,
            username: input.username,
            avatar: None,
            cover: None,
            referral_code: Some(generate_referral_code()),
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        };

        let statement = Query::insert()
            .into_table(UserTable::Table)
            .columns([
                UserTable::Id,
                UserTable::Email,
                UserTable::Username,
                UserTable::ReferralCode,
                UserTable::CreatedAt,
            ])
            .values_panic([
                user.id.to_owned().into(),
                user.email.to_owned().into(),
                user.username.to_owned().into(),
                user.referral_code.to_owned().into(),
                user.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        tracing::info!(user_id = %user.id, "user created");

        self.observer.created(&user, context).await?;

        Ok(user)
    }

    pub async fn update(
        &self,
        id: impl Into<String>,
        mut changes: UserChanges,
    ) -> creatorhub_shared::Result<User> {
        changes.validate()?;

        let Some(user) = self.find(id).await? else {
            return Err(creatorhub_shared::Error::NotFound);
        };

        self.observer.updating(&user, &mut changes).await?;

        if changes.is_empty() {
            return Ok(user);
        }

        let mut statement = Query::update()
            .table(UserTable::Table)
            .and_where(Expr::col(UserTable::Id).eq(user.id.to_owned()))
            .to_owned();

        if let Some(username) = changes.username {
            statement.value(UserTable::Username, username);
        }

        if let Some(avatar) = changes.avatar {
            statement.value(UserTable::Avatar, avatar);
        }

        if let Some(cover) = changes.cover {
            statement.value(UserTable::Cover, cover);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        match self.find(&user.id).await? {
            Some(user) => Ok(user),
            _ => Err(creatorhub_shared::Error::NotFound),
        }
    }

    pub async fn delete(&self, id: impl Into<String>) -> creatorhub_shared::Result<()> {
        let Some(user) = self.find(id).await? else {
            return Err(creatorhub_shared::Error::NotFound);
        };

        self.observer.deleting(&user).await?;

        let statement = Query::delete()
            .from_table(UserTable::Table)
            .and_where(Expr::col(UserTable::Id).eq(user.id.to_owned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        tracing::info!(user_id = %user.id, "user deleted");

        Ok(())
    }
}
