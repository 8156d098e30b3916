use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use contact_backend::{
    email::resend::ResendMailer, graceful_shutdown::shutdown_signal, routes, settings::AppConfig,
    AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::new().context("failed to load configuration")?;
    tracing::info!("Loaded configuration: {:?}", config);

    let app_state = web::Data::new(AppState::new(&config));

    let server_addr = format!("{}:{}", config.host, config.port);
    let cors_origins = config.cors_origins();
    let workers = config.worker_count;

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::trim())
            .wrap(routes::cors_for(&cors_origins))
            .configure(routes::configure_routes::<ResendMailer>)
    })
    .workers(workers)
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run();

    tokio::select! {
        res = server => res.map_err(Into::into),
        _ = shutdown_signal() => Ok(()),
    }
}
