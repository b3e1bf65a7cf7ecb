use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 推荐人 telegram id 列表
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReferredBy(pub Vec<String>);

/// One purchase made by a referred user, with the bonus it earned the referrer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralPurchase {
    pub order_id: String,
    #[serde(default)]
    pub referred_user_id: Option<String>,
    pub amount: i64,
    pub bonus: i64,
    pub date: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReferralPurchases(pub Vec<ReferralPurchase>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub telegram_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub referred_by: ReferredBy,
    pub referral_count: i64,
    /// 累计推荐奖励 (so'm)，结算后清零
    pub referral_bonus: i64,
    #[sea_orm(column_type = "Json")]
    pub referral_purchases: ReferralPurchases,
    pub card_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
