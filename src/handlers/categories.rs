use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::error::AppResult;
use crate::handlers::form::{FormController, FormTarget};
use crate::handlers::listing::cached_view;
use crate::models::*;
use crate::services::{CategoryService, ViewCache};

/// Product listings show category names
const CATEGORY_SCOPES: &[&str] = &["/api/categories", "/api/products"];

async fn save_category(
    service: web::Data<CategoryService>,
    target: FormTarget,
    input: CategoryInput,
) -> AppResult<CategoryResponse> {
    match target {
        FormTarget::Create => service.create_category(input).await,
        FormTarget::Update(id) => service.update_category(&id, input).await,
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "category",
    params(
        ("page" = Option<String>, Query, description = "页码，默认 1"),
        ("limit" = Option<String>, Query, description = "每页数量，默认 10，最大 100"),
        ("search" = Option<String>, Query, description = "按名称、描述搜索")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取分类列表成功"),
        (status = 401, description = "未授权"),
        (status = 500, description = "查询失败")
    )
)]
pub async fn list_categories(
    service: web::Data<CategoryService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let params = ListParams::from_query(&query);
    Ok(cached_view(&cache, &req, "Failed to fetch categories", service.list_categories(&params)).await)
}

#[utoipa::path(
    get,
    path = "/api/categories/all",
    tag = "category",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取全部分类成功", body = [CategoryResponse]),
        (status = 401, description = "未授权")
    )
)]
pub async fn all_categories(
    service: web::Data<CategoryService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    Ok(cached_view(&cache, &req, "Failed to fetch categories", service.all_categories()).await)
}

#[utoipa::path(
    get,
    path = "/api/categories/stats",
    tag = "category",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "分类统计", body = CategoryStats),
        (status = 401, description = "未授权")
    )
)]
pub async fn category_stats(
    service: web::Data<CategoryService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    Ok(cached_view(&cache, &req, "Failed to fetch category stats", service.category_stats()).await)
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "category",
    params(
        ("id" = String, Path, description = "分类 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "分类详情", body = CategoryResponse),
        (status = 404, description = "分类不存在")
    )
)]
pub async fn get_category(
    service: web::Data<CategoryService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    Ok(cached_view(&cache, &req, "Failed to fetch category", service.get_category(&path)).await)
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "category",
    request_body(content = CategoryForm, content_type = "application/x-www-form-urlencoded"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建分类成功", body = CategoryResponse),
        (status = 400, description = "表单校验失败")
    )
)]
pub async fn create_category(
    service: web::Data<CategoryService>,
    cache: web::Data<ViewCache>,
    form: web::Form<CategoryForm>,
) -> Result<HttpResponse> {
    let controller = FormController::new(
        &cache,
        FormTarget::Create,
        CATEGORY_SCOPES,
        "Failed to create category",
    );
    Ok(controller
        .submit(form.into_inner(), |target, input| {
            save_category(service.clone(), target, input)
        })
        .await)
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "category",
    params(
        ("id" = String, Path, description = "分类 ID")
    ),
    request_body(content = CategoryForm, content_type = "application/x-www-form-urlencoded"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新分类成功", body = CategoryResponse),
        (status = 400, description = "表单校验失败"),
        (status = 404, description = "分类不存在")
    )
)]
pub async fn update_category(
    service: web::Data<CategoryService>,
    cache: web::Data<ViewCache>,
    path: web::Path<String>,
    form: web::Form<CategoryForm>,
) -> Result<HttpResponse> {
    let controller = FormController::new(
        &cache,
        FormTarget::Update(path.into_inner()),
        CATEGORY_SCOPES,
        "Failed to update category",
    );
    Ok(controller
        .submit(form.into_inner(), |target, input| {
            save_category(service.clone(), target, input)
        })
        .await)
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "category",
    params(
        ("id" = String, Path, description = "分类 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除分类成功"),
        (status = 404, description = "分类不存在"),
        (status = 409, description = "仍有商品引用该分类")
    )
)]
pub async fn delete_category(
    service: web::Data<CategoryService>,
    cache: web::Data<ViewCache>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let controller = FormController::new(
        &cache,
        FormTarget::Update(path.into_inner()),
        CATEGORY_SCOPES,
        "Failed to delete category",
    );
    Ok(controller
        .run(|target| async move {
            let id = target.into_id()?;
            service.delete_category(&id).await
        })
        .await)
}

pub fn category_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/all", web::get().to(all_categories))
            .route("/stats", web::get().to(category_stats))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}
