use axum::{middleware, Router};

use crate::state::AppState;

pub mod claims;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use extractors::{require_token, AuthUser};
pub use jwt::JwtKeys;

pub fn public_router() -> Router<AppState> {
    handlers::public_routes()
}

/// Routes that require a valid bearer token; `extra` is merged in before
/// the guard is applied so it covers every private route.
pub fn private_router(state: AppState, extra: Router<AppState>) -> Router<AppState> {
    handlers::private_routes()
        .merge(extra)
        .route_layer(middleware::from_fn_with_state(state, require_token))
}
