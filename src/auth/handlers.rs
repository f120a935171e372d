use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            present, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
            RegisterResponse,
        },
        extractors::AuthUser,
        password::{hash_password, verify_password},
    },
    error::ApiError,
    state::AppState,
    users::StoreError,
};

pub const INSUFFICIENT_INFO: &str =
    "Insufficient information.Please check and provide proper inputs.";
pub const ALREADY_EXISTS: &str =
    "Exception while inserting record in database,User details already exists in table.";
pub const UNKNOWN_USER: &str =
    "Login failed.Unable to find the User details in Database.Please contact admin";
pub const BAD_CREDENTIALS: &str = "Login failed. Check your credentials.";

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn private_routes() -> Router<AppState> {
    Router::new()
        .route("/protected", get(protected))
        .route("/logout", get(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(payload) = payload?;

    let (Some(username), Some(password), Some(email)) = (
        present(&payload.username),
        present(&payload.password),
        present(&payload.email),
    ) else {
        warn!("registration with missing fields");
        return Err(ApiError::BadRequest(INSUFFICIENT_INFO.into()));
    };

    let hash = hash_password(password)?;

    let user_id = match state.users.create(username, &hash, email).await {
        Ok(id) => id,
        Err(StoreError::Conflict) => {
            warn!(username, "user already exists");
            return Err(ApiError::Conflict(ALREADY_EXISTS.into()));
        }
        Err(e) => return Err(ApiError::Internal(e.into())),
    };

    info!(user_id, username, "user registered");
    Ok(Json(RegisterResponse {
        message: "User registered successfully".into(),
    }))
}

#[instrument(skip(state, payload), fields(principal))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload?;

    let (Some(username), Some(password)) =
        (present(&payload.username), present(&payload.password))
    else {
        warn!("login with missing fields");
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS.into()));
    };

    let user = state
        .users
        .find_by_username(username)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .ok_or_else(|| {
            warn!(username, "login unknown username");
            ApiError::Unauthorized(UNKNOWN_USER.into())
        })?;

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS.into()));
    }

    tracing::Span::current().record("principal", user.username.as_str());
    let auth_token = state.keys.issue(&user.username)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        auth_token,
    }))
}

#[instrument(skip_all, fields(principal = %user.0))]
pub async fn protected(user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new("This route is protected."))
}

/// Tokens are self-contained, so this only ends the request-scoped principal.
#[instrument(skip_all, fields(principal = %user.0))]
pub async fn logout(user: AuthUser) -> Json<MessageResponse> {
    info!("user logged out");
    Json(MessageResponse::new("Logged out"))
}
