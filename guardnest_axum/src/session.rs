use axum::{
    extract::FromRequestParts,
    response::{IntoResponse, Response},
};
use http::request::Parts;

use super::error::ErrorBody;
use guardnest::{AuthenticatedUser, DenyReason};

/// Identity of the caller, placed in request extensions by [`require_session`].
///
/// Extracting it on a route without the gate is rejected with 401.
///
/// [`require_session`]: crate::require_session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

impl From<AuthenticatedUser> for AuthUser {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
        }
    }
}

#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        ErrorBody {
            error: DenyReason::Unauthorized,
        }
        .into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            tracing::warn!("AuthUser requested on a route without the session gate");
            AuthRejection
        })
    }
}
