//! Login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use till_core::validation::{validate_password, validate_username};
use till_db::credentials;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// `POST /api/auth/login`
///
/// Unknown user and wrong password produce the same 401 and take the same
/// hashing time.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = body?;

    validate_username(&request.username)?;
    validate_password(&request.password)?;

    let user = state.db.users().find_by_username(&request.username).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());

    let verified = credentials::verify_login_blocking(request.password, stored_hash).await?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            warn!(username = %request.username, "Login failed");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state.jwt.issue_token(&user.username)?;

    info!(username = %user.username, "Login successful");

    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}
