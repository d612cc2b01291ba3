pub mod api;
pub mod domain;
pub mod shared;
pub mod usecases;

use shared::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::extract::DefaultBodyLimit;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::routing::{any, delete, get, post};
    use axum::Router;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::{ServeDir, ServeFile};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Log directory next to the build artifacts
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Request/latency line per handled request
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        let start = std::time::Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = next.run(req).await;

        tracing::info!(
            "{} {} -> {} in {}ms",
            method,
            path,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );

        response
    }

    let config = shared::config::load_config()?;
    let state = AppState::from_config(&config);

    // Bootstrap the storage locations so the first write does not race on
    // directory creation.
    if let Some(parent) = state.store.path().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::create_dir_all(state.images.dir())?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let static_dir = shared::config::resolve_path(&config.storage.static_dir);
    let spa_index = static_dir.join("index.html");

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/products",
            get(api::handlers::products::list_all).post(api::handlers::products::create),
        )
        .route(
            "/api/products/search/:query",
            get(api::handlers::products::search),
        )
        // Legacy deletion path, kept for older clients
        .route(
            "/api/products/id/:id",
            delete(api::handlers::products::delete_by_id),
        )
        .route(
            "/api/products/:code",
            get(api::handlers::products::get_by_code)
                .patch(api::handlers::products::update_by_code)
                .delete(api::handlers::products::delete_by_code),
        )
        .route(
            "/api/products/:code/sell",
            post(api::handlers::sales::sell),
        )
        // Unmatched API paths answer JSON, everything else is the SPA shell
        .route("/api/*rest", any(api::error::api_not_found))
        .nest_service("/images", ServeDir::new(state.images.dir()))
        .fallback_service(ServeDir::new(&static_dir).not_found_service(ServeFile::new(spa_index)))
        .layer(DefaultBodyLimit::max(api::extract::MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            // Propagate the error to stop the application
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
