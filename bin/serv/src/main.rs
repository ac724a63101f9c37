use axum::{Router, middleware, routing::get};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use vcb_api::{config::ApiConfig, state::ApiState};
use vcb_db::PgProgressStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    vcb_api::tracing::init_tracing(&config.env);

    let metrics_handle = vcb_api::metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let pool = vcb_db::create_pool(&config.database_url, config.db_max_connections).await?;
    vcb_db::ensure_db_and_migrate(&config.database_url, &pool).await?;
    tracing::info!("Database ready, migrations applied");

    let state = ApiState::new(pool);

    let cors = vcb_api::middleware::cors::create_cors_layer(
        &config.parsed_allowed_origins(),
        config.env,
    );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Metrics endpoint carries its own state
    let metrics_app = Router::new()
        .route("/metrics", get(vcb_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = vcb_api::router::router::<PgProgressStore>()
        .merge(metrics_app)
        .with_state(state)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(vcb_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            vcb_api::middleware::request_id::request_id_middleware,
        ));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server running on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
