use crate::database::LazyConnection;
use crate::entities::{payment_check_entity as checks, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::user_service::USER_SEARCH_COLUMNS;
use crate::utils::{contains_any, fetch_page};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 推荐奖励结算: 候选用户、结算凭证
#[derive(Clone)]
pub struct PayoutService {
    db: LazyConnection,
}

impl PayoutService {
    pub fn new(db: LazyConnection) -> Self {
        Self { db }
    }

    /// Users with a card on file. Filtered in the query so pagination
    /// counts only candidates.
    pub async fn list_payout_candidates(
        &self,
        params: &ListParams,
    ) -> AppResult<Paginated<UserResponse>> {
        let db = self.db.conn().await?;

        let mut select = users::Entity::find()
            .filter(users::Column::CardNumber.is_not_null())
            .filter(users::Column::CardNumber.ne(""))
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id);
        if let Some(term) = &params.search {
            select = select.filter(contains_any(&USER_SEARCH_COLUMNS, term));
        }

        let page = fetch_page(db, select, params).await?;
        Ok(page.map(UserResponse::from))
    }

    pub async fn list_checks(
        &self,
        params: &ListParams,
        filter: &CheckFilter,
    ) -> AppResult<Paginated<PaymentCheckResponse>> {
        let db = self.db.conn().await?;

        let mut select = checks::Entity::find()
            .order_by_desc(checks::Column::CreatedAt)
            .order_by_desc(checks::Column::Id);
        if let Some(chat_id) = filter.chat_id.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            select = select.filter(checks::Column::ChatId.eq(chat_id));
        }
        if let Some(term) = &params.search {
            select = select.filter(contains_any(
                &[checks::Column::ChatId, checks::Column::Name],
                term,
            ));
        }

        let page = fetch_page(db, select, params).await?;
        Ok(page.map(PaymentCheckResponse::from))
    }

    /// Stores the transfer receipt and zeroes the user's referral bonus in
    /// one transaction.
    pub async fn record_payout(
        &self,
        telegram_id: &str,
        receipt: PayoutReceipt,
    ) -> AppResult<PayoutResponse> {
        let db = self.db.conn().await?;
        let txn = db.begin().await?;

        let user = users::Entity::find()
            .filter(users::Column::TelegramId.eq(telegram_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        let paid_out = user.referral_bonus;

        let check = checks::ActiveModel {
            chat_id: Set(user.telegram_id.clone()),
            name: Set(receipt.name),
            image_url: Set(receipt.image_url),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut am = user.into_active_model();
        am.referral_bonus = Set(0);
        let user = am.update(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Payout recorded for {telegram_id}: bonus {paid_out} cleared, check {}",
            check.id
        );
        Ok(PayoutResponse {
            check: PaymentCheckResponse::from(check),
            user: UserResponse::from(user),
        })
    }
}
