//! Write side: validate a submitted form, run the mutation, drop stale views.

use std::future::Future;

use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, FormSchema};
use crate::services::ViewCache;

/// What a form writes to. Fixed when the controller is built from the
/// route, so nothing in the payload can redirect the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Update(String),
}

impl FormTarget {
    pub fn into_id(self) -> AppResult<String> {
        match self {
            FormTarget::Update(id) => Ok(id),
            FormTarget::Create => Err(AppError::InternalError(
                "form has no target id".to_string(),
            )),
        }
    }
}

pub struct FormController<'a> {
    cache: &'a ViewCache,
    target: FormTarget,
    /// Path prefixes whose cached views the write makes stale
    scopes: &'static [&'static str],
    fallback: &'static str,
}

impl<'a> FormController<'a> {
    pub fn new(
        cache: &'a ViewCache,
        target: FormTarget,
        scopes: &'static [&'static str],
        fallback: &'static str,
    ) -> Self {
        Self {
            cache,
            target,
            scopes,
            fallback,
        }
    }

    /// Validation failures never reach `write`
    pub async fn submit<S, T, F, Fut>(self, form: S, write: F) -> HttpResponse
    where
        S: FormSchema,
        T: Serialize,
        F: FnOnce(FormTarget, S::Output) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let input = match form.validate() {
            Ok(input) => input,
            Err(errors) => return AppError::ValidationError(errors).respond(self.fallback),
        };

        match write(self.target, input).await {
            Ok(data) => {
                invalidate(self.cache, self.scopes).await;
                HttpResponse::Ok().json(ApiResponse::success(data))
            }
            Err(e) => e.respond(self.fallback),
        }
    }

    /// For mutations without a form body (delete, mark as read)
    pub async fn run<T, F, Fut>(self, write: F) -> HttpResponse
    where
        T: Serialize,
        F: FnOnce(FormTarget) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        match write(self.target).await {
            Ok(data) => {
                invalidate(self.cache, self.scopes).await;
                HttpResponse::Ok().json(ApiResponse::success(data))
            }
            Err(e) => e.respond(self.fallback),
        }
    }
}

async fn invalidate(cache: &ViewCache, scopes: &[&str]) {
    for scope in scopes {
        cache.invalidate_prefix(scope).await;
    }
}
