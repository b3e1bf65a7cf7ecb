//! Read side shared by every admin list, detail and stats endpoint.

use std::future::Future;

use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::ApiResponse;
use crate::services::ViewCache;

/// Serves the request from the view cache, or runs `load` and caches the
/// rendered body. Failures are answered with `fallback` and never cached.
pub async fn cached_view<T, F>(
    cache: &ViewCache,
    req: &HttpRequest,
    fallback: &str,
    load: F,
) -> HttpResponse
where
    T: Serialize,
    F: Future<Output = AppResult<T>>,
{
    let path = req.path();
    let query = req.query_string();
    if let Some(body) = cache.get(path, query).await {
        return HttpResponse::Ok().json(body);
    }

    let generation = cache.generation().await;
    let data = match load.await {
        Ok(data) => data,
        Err(e) => return e.respond(fallback),
    };
    match serde_json::to_value(ApiResponse::success(data)) {
        Ok(body) => {
            cache.put(path, query, body.clone(), generation).await;
            HttpResponse::Ok().json(body)
        }
        Err(e) => AppError::from(e).respond(fallback),
    }
}

/// Views of collections the bot also writes (orders, users and everything
/// derived from them) are always loaded fresh.
pub async fn live_view<T, F>(fallback: &str, load: F) -> HttpResponse
where
    T: Serialize,
    F: Future<Output = AppResult<T>>,
{
    match load.await {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(data)),
        Err(e) => e.respond(fallback),
    }
}
