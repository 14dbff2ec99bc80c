use actix_web::HttpServer;
use actix_web::web::Data;
use anyhow::Context;

#[cfg(test)]
#[macro_use]
mod test_util;

mod api;
mod config;
mod docs;
mod error;
mod model;
mod routes;
mod state;
mod store;

use config::Config;
use state::AppState;

use tracing::info;
use tracing_appender::rolling;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!("Server starting...");

    // One store for every worker; lives as long as the server
    let state = Data::new(AppState::new());
    let server_addr = config.server_addr();
    let config_data = config.clone();

    let server = HttpServer::new(move || routes::build_app(config_data.clone(), state.clone()))
        .bind(&server_addr)
        .with_context(|| format!("failed to bind {server_addr}"))?;

    info!("Server running on http://localhost:{}", config.port);

    server.run().await.context("server error")?;

    Ok(())
}
