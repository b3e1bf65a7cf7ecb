use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::category::CategoryRef;
use crate::entities::product_entity;

/// Filters accepted by the product list on top of [`super::ListQuery`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    #[schema(example = "Rose Noir")]
    pub name: String,
    pub description: String,
    /// so'm
    #[schema(example = 350000)]
    pub price: i64,
    pub image_url: String,
    pub brand: String,
    #[schema(example = "50ml")]
    pub volume: String,
    pub category_id: Option<i32>,
    /// 引用的分类已被删除时为空
    pub category: Option<CategoryRef>,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductResponse {
    pub fn with_category(m: product_entity::Model, category: Option<CategoryRef>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            price: m.price,
            image_url: m.image_url,
            brand: m.brand,
            volume: m.volume,
            category_id: m.category_id,
            category,
            in_stock: m.in_stock,
            featured: m.featured,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<product_entity::Model> for ProductResponse {
    fn from(m: product_entity::Model) -> Self {
        Self::with_category(m, None)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: u64,
    pub in_stock_products: u64,
    pub out_of_stock_products: u64,
    pub featured_products: u64,
}
