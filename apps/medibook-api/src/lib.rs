pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use config::Config;
use gateway::fanout::{AdminBroadcast, ChatBroadcast};
use store::chat::ChatStore;
use store::directory::DirectoryStore;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_store: Arc<dyn ChatStore>,
    pub directory: Arc<dyn DirectoryStore>,
    pub config: Arc<Config>,
    pub chat: Arc<ChatBroadcast>,
    pub admin: Arc<AdminBroadcast>,
}
