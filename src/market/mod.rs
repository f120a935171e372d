pub mod client;
pub mod dto;
pub mod handlers;

use axum::{extract::FromRef, Router};

pub use client::MarketClient;

use crate::state::AppState;

impl FromRef<AppState> for MarketClient {
    fn from_ref(state: &AppState) -> Self {
        state.market.clone()
    }
}

pub fn router() -> Router<AppState> {
    handlers::market_routes()
}
