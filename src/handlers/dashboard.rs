use actix_web::{web, HttpResponse, Result};

use crate::error::AppResult;
use crate::handlers::listing::live_view;
use crate::models::DashboardStats;
use crate::services::{CategoryService, OrderService, ProductService, UserService};

async fn load_dashboard(
    users: &UserService,
    orders: &OrderService,
    products: &ProductService,
    categories: &CategoryService,
) -> AppResult<DashboardStats> {
    let (users, orders, products, categories) = tokio::try_join!(
        users.user_stats(),
        orders.order_stats(),
        products.product_stats(),
        categories.category_stats(),
    )?;
    Ok(DashboardStats {
        users,
        orders,
        products,
        categories,
    })
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "dashboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "仪表盘统计", body = DashboardStats),
        (status = 401, description = "未授权")
    )
)]
pub async fn dashboard(
    users: web::Data<UserService>,
    orders: web::Data<OrderService>,
    products: web::Data<ProductService>,
    categories: web::Data<CategoryService>,
) -> Result<HttpResponse> {
    Ok(live_view(
        "Failed to fetch dashboard stats",
        load_dashboard(&users, &orders, &products, &categories),
    )
    .await)
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard));
}
