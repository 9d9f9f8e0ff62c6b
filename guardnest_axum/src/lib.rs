//! Axum integration for the guardnest session gate
//!
//! Protect routes with [`require_session`] and read the caller's identity in
//! handlers with the [`AuthUser`] extractor:
//!
//! ```no_run
//! use axum::{Router, middleware::from_fn_with_state, routing::get};
//! use guardnest::AuthGate;
//! use guardnest_axum::{AuthUser, require_session};
//!
//! async fn me(user: AuthUser) -> String {
//!     user.user_id
//! }
//!
//! fn app(gate: AuthGate) -> Router {
//!     Router::new()
//!         .route("/me", get(me))
//!         .route_layer(from_fn_with_state(gate, require_session))
//! }
//! ```

mod error;
mod handlers;
mod middleware;
mod router;
mod session;

pub use error::ErrorBody;
pub use middleware::require_session;
pub use router::{api_router, api_router_no_trace};
pub use session::{AuthRejection, AuthUser};

pub use guardnest::{AuthGate, DenyReason, GateDecision};
