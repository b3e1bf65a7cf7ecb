pub mod categories;
pub mod dashboard;
pub mod form;
pub mod listing;
pub mod orders;
pub mod payouts;
pub mod products;
pub mod users;

use actix_web::error::{InternalError, QueryPayloadError, UrlencodedError};
use actix_web::{web, HttpRequest, ResponseError};

use crate::error::AppError;

pub use categories::category_config;
pub use dashboard::dashboard_config;
pub use orders::order_config;
pub use payouts::payout_config;
pub use products::product_config;
pub use users::user_config;

/// Every admin route, mounted under `/api`
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::FormConfig::default().error_handler(form_rejected))
            .app_data(web::QueryConfig::default().error_handler(query_rejected))
            .configure(dashboard_config)
            .configure(user_config)
            .configure(category_config)
            .configure(product_config)
            .configure(order_config)
            .configure(payout_config),
    );
}

/// 提取器拒绝的请求同样返回统一错误结构，保留原状态码
fn rejected<E: ResponseError + 'static>(err: E, fallback: &str) -> actix_web::Error {
    let mut response = AppError::BadRequest(err.to_string()).respond(fallback);
    *response.status_mut() = err.status_code();
    InternalError::from_response(err, response).into()
}

fn form_rejected(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    rejected(err, "Invalid form body")
}

fn query_rejected(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejected(err, "Invalid query string")
}
