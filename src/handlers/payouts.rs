use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::error::AppResult;
use crate::handlers::form::{FormController, FormTarget};
use crate::handlers::listing::{cached_view, live_view};
use crate::middlewares::current_admin;
use crate::models::*;
use crate::services::{PayoutService, ViewCache};

/// Checks are only written here; candidate and user views are loaded live
const PAYOUT_SCOPES: &[&str] = &["/api/checks"];

async fn pay_out(
    service: web::Data<PayoutService>,
    target: FormTarget,
    receipt: PayoutReceipt,
) -> AppResult<PayoutResponse> {
    let telegram_id = target.into_id()?;
    service.record_payout(&telegram_id, receipt).await
}

#[utoipa::path(
    get,
    path = "/api/payouts",
    tag = "payout",
    params(
        ("page" = Option<String>, Query, description = "页码，默认 1"),
        ("limit" = Option<String>, Query, description = "每页数量，默认 10，最大 100"),
        ("search" = Option<String>, Query, description = "按 telegram id、用户名、姓名、电话搜索")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已绑定银行卡的用户"),
        (status = 401, description = "未授权")
    )
)]
pub async fn list_payout_candidates(
    service: web::Data<PayoutService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let params = ListParams::from_query(&query);
    Ok(live_view("Failed to fetch users", service.list_payout_candidates(&params)).await)
}

#[utoipa::path(
    post,
    path = "/api/payouts/{telegram_id}",
    tag = "payout",
    params(
        ("telegram_id" = String, Path, description = "Telegram 用户 ID")
    ),
    request_body(content = PayoutForm, content_type = "application/x-www-form-urlencoded"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "结算成功，奖励已清零", body = PayoutResponse),
        (status = 400, description = "凭证无效"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn record_payout(
    service: web::Data<PayoutService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<PayoutForm>,
) -> Result<HttpResponse> {
    if let Some(admin) = current_admin(&req) {
        log::info!("Admin {} ({}) recording payout for {}", admin.id, admin.email, path.as_str());
    }
    let controller = FormController::new(
        &cache,
        FormTarget::Update(path.into_inner()),
        PAYOUT_SCOPES,
        "Failed to record payout",
    );
    Ok(controller
        .submit(form.into_inner(), |target, receipt| {
            pay_out(service.clone(), target, receipt)
        })
        .await)
}

#[utoipa::path(
    get,
    path = "/api/checks",
    tag = "payout",
    params(
        ("page" = Option<String>, Query, description = "页码，默认 1"),
        ("limit" = Option<String>, Query, description = "每页数量，默认 10，最大 100"),
        ("search" = Option<String>, Query, description = "按 chat id、文件名搜索"),
        ("chatId" = Option<String>, Query, description = "Telegram chat id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "结算凭证列表"),
        (status = 401, description = "未授权")
    )
)]
pub async fn list_checks(
    service: web::Data<PayoutService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
    filter: web::Query<CheckFilter>,
) -> Result<HttpResponse> {
    let params = ListParams::from_query(&query);
    Ok(cached_view(
        &cache,
        &req,
        "Failed to fetch payment checks",
        service.list_checks(&params, &filter),
    )
    .await)
}

pub fn payout_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payouts")
            .route("", web::get().to(list_payout_candidates))
            .route("/{telegram_id}", web::post().to(record_payout)),
    )
    .service(web::scope("/checks").route("", web::get().to(list_checks)));
}
