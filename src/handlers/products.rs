use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::error::AppResult;
use crate::handlers::form::{FormController, FormTarget};
use crate::handlers::listing::cached_view;
use crate::models::*;
use crate::services::{ProductService, ViewCache};

/// Category counts read product rows
const PRODUCT_SCOPES: &[&str] = &["/api/products", "/api/categories"];

async fn save_product(
    service: web::Data<ProductService>,
    target: FormTarget,
    input: ProductInput,
) -> AppResult<ProductResponse> {
    match target {
        FormTarget::Create => service.create_product(input).await,
        FormTarget::Update(id) => service.update_product(&id, input).await,
    }
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "product",
    params(
        ("page" = Option<String>, Query, description = "页码，默认 1"),
        ("limit" = Option<String>, Query, description = "每页数量，默认 10，最大 100"),
        ("search" = Option<String>, Query, description = "按名称、描述搜索"),
        ("category" = Option<String>, Query, description = "分类 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取商品列表成功"),
        (status = 401, description = "未授权"),
        (status = 500, description = "查询失败")
    )
)]
pub async fn list_products(
    service: web::Data<ProductService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
    filter: web::Query<ProductFilter>,
) -> Result<HttpResponse> {
    let params = ListParams::from_query(&query);
    Ok(cached_view(
        &cache,
        &req,
        "Failed to fetch products",
        service.list_products(&params, &filter),
    )
    .await)
}

#[utoipa::path(
    get,
    path = "/api/products/stats",
    tag = "product",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "商品统计", body = ProductStats),
        (status = 401, description = "未授权")
    )
)]
pub async fn product_stats(
    service: web::Data<ProductService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    Ok(cached_view(&cache, &req, "Failed to fetch product stats", service.product_stats()).await)
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "product",
    params(
        ("id" = String, Path, description = "商品 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "商品详情", body = ProductResponse),
        (status = 404, description = "商品不存在")
    )
)]
pub async fn get_product(
    service: web::Data<ProductService>,
    cache: web::Data<ViewCache>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    Ok(cached_view(&cache, &req, "Failed to fetch product", service.get_product(&path)).await)
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "product",
    request_body(content = ProductForm, content_type = "application/x-www-form-urlencoded"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建商品成功", body = ProductResponse),
        (status = 400, description = "表单校验失败")
    )
)]
pub async fn create_product(
    service: web::Data<ProductService>,
    cache: web::Data<ViewCache>,
    form: web::Form<ProductForm>,
) -> Result<HttpResponse> {
    let controller = FormController::new(
        &cache,
        FormTarget::Create,
        PRODUCT_SCOPES,
        "Failed to create product",
    );
    Ok(controller
        .submit(form.into_inner(), |target, input| {
            save_product(service.clone(), target, input)
        })
        .await)
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "product",
    params(
        ("id" = String, Path, description = "商品 ID")
    ),
    request_body(content = ProductForm, content_type = "application/x-www-form-urlencoded"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新商品成功", body = ProductResponse),
        (status = 400, description = "表单校验失败"),
        (status = 404, description = "商品不存在")
    )
)]
pub async fn update_product(
    service: web::Data<ProductService>,
    cache: web::Data<ViewCache>,
    path: web::Path<String>,
    form: web::Form<ProductForm>,
) -> Result<HttpResponse> {
    let controller = FormController::new(
        &cache,
        FormTarget::Update(path.into_inner()),
        PRODUCT_SCOPES,
        "Failed to update product",
    );
    Ok(controller
        .submit(form.into_inner(), |target, input| {
            save_product(service.clone(), target, input)
        })
        .await)
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "product",
    params(
        ("id" = String, Path, description = "商品 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除商品成功"),
        (status = 404, description = "商品不存在")
    )
)]
pub async fn delete_product(
    service: web::Data<ProductService>,
    cache: web::Data<ViewCache>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let controller = FormController::new(
        &cache,
        FormTarget::Update(path.into_inner()),
        PRODUCT_SCOPES,
        "Failed to delete product",
    );
    Ok(controller
        .run(|target| async move {
            let id = target.into_id()?;
            service.delete_product(&id).await
        })
        .await)
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/stats", web::get().to(product_stats))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
