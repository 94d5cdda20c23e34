use creatorhub_db::table::{UserList, UserListMember};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::ListType;

#[derive(Clone)]
pub struct SqliteListService(pub SqlitePool);

impl SqliteListService {
    async fn find_list_id(
        &self,
        owner_id: &str,
        list_type: ListType,
    ) -> creatorhub_shared::Result<Option<String>> {
        let statement = Query::select()
            .column(UserList::Id)
            .from(UserList::Table)
            .and_where(Expr::col(UserList::UserId).eq(owner_id))
            .and_where(Expr::col(UserList::Type).eq(list_type.as_ref()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        Ok(row.map(|(id,)| id))
    }

    pub async fn members(
        &self,
        owner_id: &str,
        list_type: ListType,
    ) -> creatorhub_shared::Result<Vec<String>> {
        let Some(list_id) = self.find_list_id(owner_id, list_type).await? else {
            return Ok(vec![]);
        };

        let statement = Query::select()
            .column(UserListMember::UserId)
            .from(UserListMember::Table)
            .and_where(Expr::col(UserListMember::ListId).eq(list_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn lists(&self, owner_id: &str) -> creatorhub_shared::Result<Vec<ListType>> {
        let statement = Query::select()
            .column(UserList::Type)
            .from(UserList::Table)
            .and_where(Expr::col(UserList::UserId).eq(owner_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (sqlx::types::Text<ListType>,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(list_type,)| list_type.0).collect())
    }
}

#[async_trait::async_trait]
impl super::ListService for SqliteListService {
    async fn create_default_lists(&self, user_id: &str) -> creatorhub_shared::Result<()> {
        let mut statement = Query::insert()
            .into_table(UserList::Table)
            .columns([UserList::Id, UserList::UserId, UserList::Name, UserList::Type])
            .to_owned();

        for list_type in [ListType::Following, ListType::Blocked] {
            statement.values_panic([
                Ulid::new().to_string().into(),
                user_id.into(),
                list_type.to_string().into(),
                list_type.as_ref().into(),
            ]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }

    async fn add_member(
        &self,
        owner_id: &str,
        member_id: &str,
        list_type: ListType,
    ) -> creatorhub_shared::Result<()> {
        let Some(list_id) = self.find_list_id(owner_id, list_type).await? else {
            creatorhub_shared::bail!("{list_type} list not found for user {owner_id}");
        };

        let statement = Query::insert()
            .into_table(UserListMember::Table)
            .columns([
                UserListMember::Id,
                UserListMember::ListId,
                UserListMember::UserId,
                UserListMember::CreatedAt,
            ])
            .values_panic([
                Ulid::new().to_string().into(),
                list_id.into(),
                member_id.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .on_conflict(
                OnConflict::columns([UserListMember::ListId, UserListMember::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }
}
