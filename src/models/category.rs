use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::category_entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    #[schema(example = "Oriental")]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// 仅列表接口返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u64>,
}

impl From<category_entity::Model> for CategoryResponse {
    fn from(m: category_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            image_url: m.image_url,
            product_count: None,
        }
    }
}

/// 商品所属分类的简要信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: i32,
    pub name: String,
}

pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopCategory {
    /// 分类不存在或未设置时为空
    pub id: Option<i32>,
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_categories: u64,
    pub top_categories: Vec<TopCategory>,
}
