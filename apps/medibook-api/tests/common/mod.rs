#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::time;
use tokio_tungstenite::tungstenite;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use medibook_api::auth::tokens::{self, Role};
use medibook_api::config::Config;
use medibook_api::gateway::fanout::{AdminBroadcast, ChatBroadcast};
use medibook_api::store::chat::{ChatStore, MemoryChatStore};
use medibook_api::store::directory::{DirectoryStore, MemoryDirectoryStore};
use medibook_api::AppState;

pub const TEST_JWT_SECRET: &str = "medibook-test-secret";

pub type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

pub fn test_state() -> AppState {
    let chat_store: Arc<dyn ChatStore> = Arc::new(MemoryChatStore::new());
    let directory: Arc<dyn DirectoryStore> = Arc::new(MemoryDirectoryStore::new());

    AppState {
        chat_store,
        directory,
        config: Arc::new(Config {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            port: 0,
        }),
        chat: Arc::new(ChatBroadcast::new()),
        admin: Arc::new(AdminBroadcast::new()),
    }
}

/// Start an actual TCP server for WebSocket + REST testing.
/// Returns (addr, state). The server runs in the background.
pub async fn start_server() -> (SocketAddr, AppState) {
    let state = test_state();
    let app = medibook_api::routes::router().with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

pub fn mint_admin_token(id: &str) -> String {
    tokens::mint(TEST_JWT_SECRET, id, Role::Admin).expect("mint admin token")
}

pub fn mint_doctor_token(id: &str) -> String {
    tokens::mint(TEST_JWT_SECRET, id, Role::Doctor).expect("mint doctor token")
}

pub fn mint_patient_token(id: &str) -> String {
    tokens::mint(TEST_JWT_SECRET, id, Role::Patient).expect("mint patient token")
}

/// Connect to the chat gateway (no handshake auth).
pub async fn connect_chat(addr: SocketAddr) -> WsStream {
    let url = format!("ws://{addr}/gateway/chat");
    let (ws_stream, _) = tokio_tungstenite::connect_async(&url)
        .await
        .expect("ws connect");
    ws_stream
}

/// Connect to the admin gateway with a handshake token.
pub async fn connect_admin(addr: SocketAddr, token: &str) -> WsStream {
    let url = format!("ws://{addr}/gateway/admin?token={token}");
    let (ws_stream, _) = tokio_tungstenite::connect_async(&url)
        .await
        .expect("ws connect");
    ws_stream
}

/// Send a `join_chat` event for the given appointment room.
pub async fn join_room(ws: &mut WsStream, appointment_id: &str) {
    let join = serde_json::json!({
        "event": "join_chat",
        "data": appointment_id,
    });
    ws.send(tungstenite::Message::Text(join.to_string().into()))
        .await
        .expect("send join_chat");
}

/// Read the next text frame as JSON, with a timeout.
pub async fn next_json(ws: &mut WsStream) -> serde_json::Value {
    loop {
        let msg = time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timeout waiting for frame")
            .expect("stream ended")
            .expect("ws read error");

        match msg {
            tungstenite::Message::Text(text) => {
                return serde_json::from_str(&text).expect("parse frame")
            }
            tungstenite::Message::Ping(_) | tungstenite::Message::Pong(_) => continue,
            other => panic!("expected text frame, got: {other:?}"),
        }
    }
}

/// Assert that no frame arrives within the grace window.
pub async fn expect_silence(ws: &mut WsStream, window: Duration) {
    let result = time::timeout(window, ws.next()).await;
    assert!(result.is_err(), "expected no frame, got: {result:?}");
}

/// Give the server a moment to process joins/subscriptions that have no ack.
pub async fn settle() {
    time::sleep(Duration::from_millis(150)).await;
}
