/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → 依存生成 (PgPool, IdentityExtractor, IdCodec) → Router 組み立て
 * - Middleware の適用 (HTTP / CORS / security headers)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::PgBoardRepo,
    services::{auth::build_identity_extractor, board_service::BoardService, id_codec::IdCodec},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,board_api=debug,tower_http=debug cargo run
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
        // stderr can be hidden depending on how the process is launched.
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting board API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("board API stopped");
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let identity =
        build_identity_extractor(config).context("invalid access token verification key")?;

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)
        .context("invalid sqids configuration")?;

    let boards = BoardService::new(Arc::new(PgBoardRepo::new(pool)), identity);

    Ok(AppState::new(boards, id_codec))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::http::apply(router);
    let router = middleware::security_headers::apply(router);
    middleware::cors::apply(router, config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
