use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CategoryStats, OrderStats, ProductStats, UserStats};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub users: UserStats,
    pub orders: OrderStats,
    pub products: ProductStats,
    pub categories: CategoryStats,
}
