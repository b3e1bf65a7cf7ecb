use actix_web::{web, HttpResponse, Result};

use crate::entities::OrderStatus;
use crate::error::AppResult;
use crate::handlers::form::{FormController, FormTarget};
use crate::handlers::listing::live_view;
use crate::models::*;
use crate::services::{OrderService, ViewCache};

/// Order views are loaded live, so no cached view depends on an order
const ORDER_SCOPES: &[&str] = &[];

async fn set_status(
    service: web::Data<OrderService>,
    target: FormTarget,
    status: OrderStatus,
) -> AppResult<OrderResponse> {
    let id = target.into_id()?;
    service.update_order_status(&id, status).await
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "order",
    params(
        ("page" = Option<String>, Query, description = "页码，默认 1"),
        ("limit" = Option<String>, Query, description = "每页数量，默认 10，最大 100"),
        ("search" = Option<String>, Query, description = "按用户、电话、地址搜索"),
        ("status" = Option<String>, Query, description = "订单状态")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取订单列表成功"),
        (status = 401, description = "未授权"),
        (status = 500, description = "查询失败")
    )
)]
pub async fn list_orders(
    service: web::Data<OrderService>,
    query: web::Query<ListQuery>,
    filter: web::Query<OrderFilter>,
) -> Result<HttpResponse> {
    let params = ListParams::from_query(&query);
    Ok(live_view("Failed to fetch orders", service.list_orders(&params, &filter)).await)
}

#[utoipa::path(
    get,
    path = "/api/orders/stats",
    tag = "order",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "订单统计与营收", body = OrderStats),
        (status = 401, description = "未授权")
    )
)]
pub async fn order_stats(
    service: web::Data<OrderService>,
) -> Result<HttpResponse> {
    Ok(live_view("Failed to fetch order stats", service.order_stats()).await)
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "order",
    params(
        ("id" = String, Path, description = "订单 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "订单详情", body = OrderResponse),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    Ok(live_view("Failed to fetch order", service.get_order(&path)).await)
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "order",
    params(
        ("id" = String, Path, description = "订单 ID")
    ),
    request_body(content = OrderStatusForm, content_type = "application/x-www-form-urlencoded"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新订单状态成功", body = OrderResponse),
        (status = 400, description = "状态无效"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn update_order_status(
    service: web::Data<OrderService>,
    cache: web::Data<ViewCache>,
    path: web::Path<String>,
    form: web::Form<OrderStatusForm>,
) -> Result<HttpResponse> {
    let controller = FormController::new(
        &cache,
        FormTarget::Update(path.into_inner()),
        ORDER_SCOPES,
        "Failed to update order status",
    );
    Ok(controller
        .submit(form.into_inner(), |target, status| {
            set_status(service.clone(), target, status)
        })
        .await)
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/read",
    tag = "order",
    params(
        ("id" = String, Path, description = "订单 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "标记已读成功", body = OrderResponse),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn mark_order_as_read(
    service: web::Data<OrderService>,
    cache: web::Data<ViewCache>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let controller = FormController::new(
        &cache,
        FormTarget::Update(path.into_inner()),
        ORDER_SCOPES,
        "Failed to mark order as read",
    );
    Ok(controller
        .run(|target| async move {
            let id = target.into_id()?;
            service.mark_order_as_read(&id).await
        })
        .await)
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("/stats", web::get().to(order_stats))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}/status", web::patch().to(update_order_status))
            .route("/{id}/read", web::post().to(mark_order_as_read)),
    );
}
