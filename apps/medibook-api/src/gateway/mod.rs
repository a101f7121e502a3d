pub mod admin;
pub mod chat;
pub mod events;
pub mod fanout;
pub mod session;

use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().merge(chat::router()).merge(admin::router())
}
