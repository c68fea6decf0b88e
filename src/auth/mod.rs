use axum::Router;

use crate::state::AppState;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;

pub fn router() -> Router<AppState> {
    handlers::router()
}
