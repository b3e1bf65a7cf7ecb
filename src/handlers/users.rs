use actix_web::{web, HttpResponse, Result};

use crate::handlers::listing::live_view;
use crate::models::*;
use crate::services::UserService;

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "user",
    params(
        ("page" = Option<String>, Query, description = "页码，默认 1"),
        ("limit" = Option<String>, Query, description = "每页数量，默认 10，最大 100"),
        ("search" = Option<String>, Query, description = "按 telegram id、用户名、姓名、电话搜索")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取用户列表成功"),
        (status = 401, description = "未授权"),
        (status = 500, description = "查询失败")
    )
)]
pub async fn list_users(
    service: web::Data<UserService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let params = ListParams::from_query(&query);
    Ok(live_view("Failed to fetch users", service.list_users(&params)).await)
}

#[utoipa::path(
    get,
    path = "/api/users/stats",
    tag = "user",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "用户统计", body = UserStats),
        (status = 401, description = "未授权")
    )
)]
pub async fn user_stats(
    service: web::Data<UserService>,
) -> Result<HttpResponse> {
    Ok(live_view("Failed to fetch user stats", service.user_stats()).await)
}

#[utoipa::path(
    get,
    path = "/api/users/{telegram_id}",
    tag = "user",
    params(
        ("telegram_id" = String, Path, description = "Telegram 用户 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "用户详情", body = UserResponse),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    Ok(live_view("Failed to fetch user", service.get_user(&path)).await)
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/stats", web::get().to(user_stats))
            .route("/{telegram_id}", web::get().to(get_user)),
    );
}
