use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::error::{append_set_cookies, deny_response};
use super::session::AuthUser;
use guardnest::{AuthGate, GateDecision};

/// Session gate for protected routes, for use with `from_fn_with_state`.
///
/// Allowed requests reach the inner handler with an [`AuthUser`] in their
/// extensions. Denied requests get a 401 with `{"error": reason}`. Renewed
/// session cookies are attached to either outcome.
pub async fn require_session(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Response {
    match gate.gate(req.headers()).await {
        GateDecision::Allow { user, set_cookies } => {
            req.extensions_mut().insert(AuthUser::from(user));
            let mut response = next.run(req).await;
            append_set_cookies(&mut response, set_cookies);
            response
        }
        GateDecision::Deny {
            reason,
            set_cookies,
        } => {
            tracing::debug!("Request to {} denied: {}", req.uri().path(), reason);
            deny_response(reason, set_cookies)
        }
    }
}
