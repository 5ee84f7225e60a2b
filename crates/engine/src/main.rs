//! Ballotbox Engine - Main entry point.

use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ballotbox_engine::api::{self, USER_ID_HEADER};
use ballotbox_engine::infrastructure::config::{CorsOrigins, ServerConfig};
use ballotbox_engine::infrastructure::sqlite::SqlitePollStore;
use ballotbox_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ballotbox_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ballotbox Engine");

    let config = ServerConfig::from_env()?;

    tracing::info!(path = %config.db_path, "Opening poll store");
    let store = SqlitePollStore::new(&config.db_path).await?;
    let app = Arc::new(App::new(store));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = config.cors.as_ref().and_then(build_cors_layer) {
        router = router.layer(cors);
    }

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(origins: &CorsOrigins) -> Option<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        // Clients send X-User-Id and JSON content types which trigger CORS preflights.
        .allow_headers([
            HeaderName::from_static(USER_ID_HEADER),
            axum::http::header::CONTENT_TYPE,
        ]);

    match origins {
        CorsOrigins::Any => Some(cors.allow_origin(Any)),
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|s| HeaderValue::from_str(s).ok())
                .collect();
            if origins.is_empty() {
                tracing::warn!("CORS_ALLOWED_ORIGINS has no valid origins, CORS disabled");
                return None;
            }
            Some(cors.allow_origin(origins))
        }
    }
}
