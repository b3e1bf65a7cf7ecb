use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{OrderStatus, PaymentReceipt, ReferralPurchase};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::dashboard::dashboard,
        handlers::users::list_users,
        handlers::users::user_stats,
        handlers::users::get_user,
        handlers::categories::list_categories,
        handlers::categories::all_categories,
        handlers::categories::category_stats,
        handlers::categories::get_category,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,
        handlers::products::list_products,
        handlers::products::product_stats,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::orders::list_orders,
        handlers::orders::order_stats,
        handlers::orders::get_order,
        handlers::orders::update_order_status,
        handlers::orders::mark_order_as_read,
        handlers::payouts::list_payout_candidates,
        handlers::payouts::record_payout,
        handlers::payouts::list_checks,
    ),
    components(
        schemas(
            UserResponse,
            UserStats,
            ReferralPurchase,
            CategoryResponse,
            CategoryRef,
            CategoryStats,
            TopCategory,
            CategoryForm,
            ProductResponse,
            ProductStats,
            ProductForm,
            OrderResponse,
            OrderItemResponse,
            ProductSummary,
            OrderStats,
            OrderStatus,
            OrderStatusForm,
            PaymentReceipt,
            PaymentCheckResponse,
            PayoutForm,
            PayoutResponse,
            DashboardStats,
            Pagination,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "dashboard", description = "Dashboard counters"),
        (name = "user", description = "Telegram user API"),
        (name = "category", description = "Category management API"),
        (name = "product", description = "Product catalog API"),
        (name = "order", description = "Order management API"),
        (name = "payout", description = "Referral payout API"),
    ),
    info(
        title = "Perfume Admin API",
        version = "1.0.0",
        description = "Back-office REST API for the perfume shop Telegram bot"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
