mod errors;
mod main;
mod types;

pub use errors::SessionError;
pub use main::{AuthGate, DenyReason, GateDecision, SessionService, VerifyResponse};
pub use types::{AuthenticatedUser, ExpiryState, RefreshGrant, Session, Validation};
