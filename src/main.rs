use actix_web::{App, HttpServer, middleware::Logger};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use perfume_admin::{
    config::Config,
    database::LazyConnection,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::{AppServices, ViewCache},
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = match Config::from_toml() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    // 数据库连接在第一次请求时建立
    let db = LazyConnection::new(config.database.clone());

    // 创建JWT服务 (仅校验认证服务签发的管理员令牌)
    let jwt_service = JwtService::new(&config.auth.jwt_secret, config.auth.token_expires_in);
    let login_url = config.auth.login_url.clone();

    let cache = ViewCache::new(config.cache.ttl_seconds);
    if !cache.is_enabled() {
        log::info!("View cache disabled");
    }
    let services = AppServices::new(db, cache);

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone(), login_url.clone()))
            .wrap(create_cors())
            .wrap(Logger::default())
            .configure(move |cfg| services.app_data(cfg))
            .configure(swagger_config)
            .configure(handlers::api_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
