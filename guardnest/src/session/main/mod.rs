mod cookie;
mod gate;
mod validator;

#[cfg(test)]
mod test_utils;

pub use gate::{AuthGate, DenyReason, GateDecision, VerifyResponse};
pub use validator::SessionService;
