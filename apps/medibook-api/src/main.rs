use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medibook_api::config::Config;
use medibook_api::gateway::fanout::{AdminBroadcast, ChatBroadcast};
use medibook_api::store::chat::{ChatStore, MemoryChatStore};
use medibook_api::store::directory::{DirectoryStore, MemoryDirectoryStore};
use medibook_api::AppState;
use std::path::Path;

#[tokio::main]
async fn main() {
    // Load .env file (silently skip if missing — env vars may be set externally)
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let port = config.port;

    // In-memory stores for single-process deployments. Replace with the
    // document-store backed implementations when wiring a real cluster.
    let chat_store: Arc<dyn ChatStore> = Arc::new(MemoryChatStore::new());
    let directory: Arc<dyn DirectoryStore> = Arc::new(MemoryDirectoryStore::new());

    let state = AppState {
        chat_store,
        directory,
        config: Arc::new(config),
        chat: Arc::new(ChatBroadcast::new()),
        admin: Arc::new(AdminBroadcast::new()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = axum::Router::new()
        .merge(medibook_api::routes::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "medibook-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
