use actix_web::dev::Server;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use std::time::Duration;
use tracing::{debug, warn};

use stepboard::config::AppConfig;
use stepboard::models::AppStartTime;
use stepboard::runtime::lifetime::{shutdown, startup};
use stepboard::runtime::logging;

/// 构建 HTTP 服务器，所有 worker 共享同一个启动上下文
fn build_server(
    config: &'static AppConfig,
    context: web::Data<startup::StartupContext>,
    started: AppStartTime,
) -> std::io::Result<Server> {
    let keep_alive = config.server.timeouts.keep_alive;
    let payload_limit = config.server.limits.max_payload_size;

    let server = HttpServer::new(move || {
        let context = context.clone();
        App::new()
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Keep-Alive", format!("timeout={keep_alive}, max=1000")))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(web::Data::new(started.clone()))
            .app_data(web::PayloadConfig::new(payload_limit))
            .configure(|cfg| context.configure(cfg))
    })
    .keep_alive(Duration::from_secs(keep_alive))
    .client_request_timeout(Duration::from_millis(
        config.server.timeouts.client_request,
    ))
    .client_disconnect_timeout(Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    let bind_address = config.server_bind_address();
    warn!(
        "Listening on http://{} with {} workers",
        bind_address, config.server.workers
    );
    Ok(server.bind(bind_address)?.run())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    setup_panic!();
    dotenv().ok();

    let started = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    // 配置必须先于日志加载，日志级别来自配置
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to load configuration: {e}");
        return Err(std::io::Error::other(e.to_string()));
    }
    let config = AppConfig::get();
    let _log_guard = logging::init_tracing(config);

    warn!(
        "{} v{} starting in {} mode",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let context = match startup::prepare_server_startup(config).await {
        Ok(context) => web::Data::new(context),
        Err(e) => {
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            return Err(std::io::Error::other(e.format_simple()));
        }
    };

    debug!(
        "Startup context ready after {} ms",
        chrono::Utc::now()
            .signed_duration_since(started.start_datetime)
            .num_milliseconds()
    );

    let server = build_server(config, context, started)?;

    tokio::select! {
        res = server => res?,
        _ = shutdown::listen_for_shutdown() => {
            warn!("Server stopped");
        }
    }

    Ok(())
}
