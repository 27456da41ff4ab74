//! Authentication handlers
//!
//! Endpoints for user registration and login.

use axum::extract::State;
use trpg_service::{AuthService, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<ApiResponse<RegisterResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(ApiResponse::with_message("User registered successfully", response))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(ApiResponse::with_message("Login successful", response))
}
