use crate::database::LazyConnection;
use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{contains_any, fetch_page, start_of_today};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

pub(crate) const USER_SEARCH_COLUMNS: [users::Column; 5] = [
    users::Column::TelegramId,
    users::Column::Username,
    users::Column::FirstName,
    users::Column::LastName,
    users::Column::PhoneNumber,
];

#[derive(Clone)]
pub struct UserService {
    db: LazyConnection,
}

impl UserService {
    pub fn new(db: LazyConnection) -> Self {
        Self { db }
    }

    pub async fn list_users(&self, params: &ListParams) -> AppResult<Paginated<UserResponse>> {
        let db = self.db.conn().await?;

        let mut select = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id);
        if let Some(term) = &params.search {
            select = select.filter(contains_any(&USER_SEARCH_COLUMNS, term));
        }

        let page = fetch_page(db, select, params).await?;
        Ok(page.map(UserResponse::from))
    }

    /// 按 telegram id 查询，而不是行 id
    pub async fn get_user(&self, telegram_id: &str) -> AppResult<UserResponse> {
        let db = self.db.conn().await?;
        users::Entity::find()
            .filter(users::Column::TelegramId.eq(telegram_id))
            .one(db)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn user_stats(&self) -> AppResult<UserStats> {
        let db = self.db.conn().await?;

        let total_users = users::Entity::find().count(db).await?;
        let users_with_referrals = users::Entity::find()
            .filter(users::Column::ReferralCount.gt(0))
            .count(db)
            .await?;
        let users_with_phone = users::Entity::find()
            .filter(users::Column::PhoneNumber.is_not_null())
            .filter(users::Column::PhoneNumber.ne(""))
            .count(db)
            .await?;
        let new_users_today = users::Entity::find()
            .filter(users::Column::CreatedAt.gte(start_of_today()))
            .count(db)
            .await?;

        Ok(UserStats {
            total_users,
            users_with_referrals,
            users_with_phone,
            new_users_today,
        })
    }
}
