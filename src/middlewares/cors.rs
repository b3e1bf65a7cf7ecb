use actix_cors::Cors;

/// 管理后台前端跨域策略
pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // 在生产环境中应该限制允许的域名
            true
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        // 浏览器携带登录凭据
        .supports_credentials()
        .max_age(3600)
}
