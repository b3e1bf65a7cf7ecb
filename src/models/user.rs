use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{user_entity, ReferralPurchase};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    #[schema(example = "123456789")]
    pub telegram_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub referred_by: Vec<String>,
    pub referral_count: i64,
    /// so'm
    pub referral_bonus: i64,
    pub referral_purchases: Vec<ReferralPurchase>,
    pub card_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl From<user_entity::Model> for UserResponse {
    fn from(m: user_entity::Model) -> Self {
        Self {
            id: m.id,
            telegram_id: m.telegram_id,
            username: m.username,
            first_name: m.first_name,
            last_name: m.last_name,
            phone_number: m.phone_number,
            referred_by: m.referred_by.0,
            referral_count: m.referral_count,
            referral_bonus: m.referral_bonus,
            referral_purchases: m.referral_purchases.0,
            card_number: m.card_number,
            created_at: m.created_at,
            last_active: m.last_active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: u64,
    pub users_with_referrals: u64,
    pub users_with_phone: u64,
    pub new_users_today: u64,
}
