use crate::context::AppContext;
use crate::server::{routes, static_files};
use crate::state::DemoAppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the Axum application over an already-loaded context
pub fn build_app(context: Arc<AppContext>) -> Router {
    let assets_dir = context.config.assets_dir.clone();
    let origins: Vec<HeaderValue> = context
        .config
        .server
        .local_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let state = DemoAppState::new(context);

    // CORS defaults to local origins; override only for explicit demo use.
    let allow_any_origin = std::env::var("TWEETSENSE_DEMO_ALLOW_ANY_ORIGIN")
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let cors = if allow_any_origin {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // API routes
    let api_routes = Router::new()
        // Health
        .route("/health", get(routes::health))
        // Navigation and page views
        .route("/pages", get(routes::list_pages))
        .route("/view", get(routes::get_view))
        // Models and predictions
        .route("/models", get(routes::list_models))
        .route("/predict", post(routes::predict))
        // Dataset
        .route("/dataset", get(routes::get_dataset));

    Router::new()
        .route("/", get(routes::page))
        .nest("/api", api_routes)
        .route("/static/*path", get(static_files::serve_static))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run_server(context: Arc<AppContext>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_app(context);

    tracing::info!("Starting TweetSense demo server on {}", addr);
    tracing::info!("Open http://{} in your browser", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
