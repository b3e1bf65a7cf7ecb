use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserResponse;
use crate::entities::payment_check_entity;

/// Filters accepted by the check list on top of [`super::ListQuery`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckFilter {
    #[serde(rename = "chatId")]
    pub chat_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCheckResponse {
    pub id: i32,
    pub chat_id: String,
    #[schema(example = "image.jpg")]
    pub name: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<payment_check_entity::Model> for PaymentCheckResponse {
    fn from(m: payment_check_entity::Model) -> Self {
        Self {
            id: m.id,
            chat_id: m.chat_id,
            name: m.name,
            image_url: m.image_url,
            created_at: m.created_at,
        }
    }
}

/// 结算结果: 新凭证和清零后的用户
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayoutResponse {
    pub check: PaymentCheckResponse,
    pub user: UserResponse,
}
