//! User handlers
//!
//! Endpoints for the caller's own profile and password.

use axum::extract::State;
use trpg_service::{ProfileResponse, UpdatePasswordRequest, UpdateProfileRequest, UserService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Get current user's profile
///
/// GET /user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiResponse<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_profile(auth.user_id).await?;
    Ok(ApiResponse::ok(response))
}

/// Update nickname and/or avatar
///
/// PUT /user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<ApiResponse<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(ApiResponse::with_message("Profile updated successfully", response))
}

/// Change password
///
/// PUT /user/password
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdatePasswordRequest>,
) -> ApiResult<ApiResponse<()>> {
    let service = UserService::new(state.service_context());
    service.update_password(auth.user_id, request).await?;
    Ok(ApiResponse::message("Password updated successfully"))
}
