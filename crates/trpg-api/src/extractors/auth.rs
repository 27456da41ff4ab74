//! Authentication extractor
//!
//! Extracts and validates JWT tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use trpg_core::Snowflake;
use trpg_service::{AuthService, Identity};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the `sub` claim
    pub user_id: Snowflake,
    pub email: String,
}

impl From<Identity> for AuthUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email,
        }
    }
}

/// Resolve a bearer token through the auth service
fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    AuthService::new(state.service_context())
        .authenticate(token)
        .map(AuthUser::from)
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected access token");
            ApiError::Service(e)
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        ApiError::MissingAuth
                    } else {
                        ApiError::InvalidAuthFormat
                    }
                })?;

        authenticate(&AppState::from_ref(state), bearer.token())
    }
}

/// Optional authenticated user
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.as_ref().map(|user| user.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let user = authenticate(&AppState::from_ref(state), bearer.token())?;
                Ok(OptionalAuthUser(Some(user)))
            }
            Err(rejection) if rejection.is_missing() => Ok(OptionalAuthUser(None)),
            Err(_) => Err(ApiError::InvalidAuthFormat),
        }
    }
}
