/*
 * Responsibility
 * - Config → backend client → gate → Router
 * - Apply Router-wide middleware (http / security headers), path folding around it
 * - axum::serve() until ctrl-c
 */
use std::{panic, process};

use axum::{Router, ServiceExt, extract::Request};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::routes::{self, gate::Gate};
use crate::services::backend::BackendClient;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins; e.g. RUST_LOG=info,blog_portal=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash so it gets noticed. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting blog portal in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState, AppError> {
    let http = reqwest::Client::builder()
        .timeout(config.identity_timeout)
        .build()?;
    let backend = BackendClient::initialize(config.backend.clone(), &config.endpoints, http)?;

    tracing::info!(
        project = %backend.settings().project_id,
        auth_domain = %backend.settings().auth_domain,
        documents = %backend.store().documents_url(),
        "backend client ready"
    );

    let gate = Gate::new(backend.auth());

    Ok(AppState::new(
        gate,
        &config.base_path,
        &config.session_cookie_name,
    ))
}

pub fn build_app(state: AppState) -> middleware::path::App {
    let pages = routes::routes(&state);

    // axum cannot nest at "/", so the default base is served as-is.
    let pages = if &*state.base_path == "/" {
        pages
    } else {
        Router::new().nest(&state.base_path, pages)
    };

    let router = pages.with_state(state);
    let router = middleware::security_headers::apply(router);
    let router = middleware::http::apply(router);
    middleware::path::wrap(router)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Without a signal handler, keep serving until the process is killed.
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
