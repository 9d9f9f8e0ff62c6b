use std::fmt;

use http::HeaderValue;
use http::header::HeaderMap;
use serde::Serialize;

use crate::config::{REFRESH_COOKIE_NAME, SESSION_COOKIE_NAME};
use crate::session::errors::SessionError;
use crate::session::types::{AuthenticatedUser, Validation};

use super::cookie::{get_cookie_from_headers, raw_cookie_header, redact_token};
use super::validator::SessionService;

/// Short machine-readable reason carried by a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DenyReason {
    #[serde(rename = "missing session")]
    MissingSession,
    #[serde(rename = "unauthorized")]
    Unauthorized,
    #[serde(rename = "expired, refresh triggered")]
    ExpiredRefreshTriggered,
    #[serde(rename = "invalid or expired")]
    InvalidOrExpired,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::MissingSession => "missing session",
            DenyReason::Unauthorized => "unauthorized",
            DenyReason::ExpiredRefreshTriggered => "expired, refresh triggered",
            DenyReason::InvalidOrExpired => "invalid or expired",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request verdict of the gate.
///
/// `set_cookies` must be copied onto the response whatever the verdict.
#[derive(Debug, Clone)]
pub enum GateDecision {
    Allow {
        user: AuthenticatedUser,
        set_cookies: Vec<HeaderValue>,
    },
    Deny {
        reason: DenyReason,
        set_cookies: Vec<HeaderValue>,
    },
}

impl GateDecision {
    fn deny(reason: DenyReason) -> Self {
        GateDecision::Deny {
            reason,
            set_cookies: Vec::new(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow { .. })
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            GateDecision::Allow { user, .. } => Some(user),
            GateDecision::Deny { .. } => None,
        }
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            GateDecision::Deny { reason, .. } => Some(*reason),
            GateDecision::Allow { .. } => None,
        }
    }

    pub fn set_cookies(&self) -> &[HeaderValue] {
        match self {
            GateDecision::Allow { set_cookies, .. } | GateDecision::Deny { set_cookies, .. } => {
                set_cookies
            }
        }
    }

    pub fn into_set_cookies(self) -> Vec<HeaderValue> {
        match self {
            GateDecision::Allow { set_cookies, .. } | GateDecision::Deny { set_cookies, .. } => {
                set_cookies
            }
        }
    }
}

/// Body of the read-only verify probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DenyReason>,
}

impl VerifyResponse {
    fn invalid(reason: DenyReason) -> Self {
        Self {
            valid: false,
            user_id: None,
            error: Some(reason),
        }
    }
}

/// Request gating policy for protected routes.
#[derive(Clone)]
pub struct AuthGate {
    service: SessionService,
    cookie_name: String,
    refresh_cookie_name: Option<String>,
}

impl AuthGate {
    pub fn new(service: SessionService, cookie_name: impl Into<String>) -> Self {
        Self {
            service,
            cookie_name: cookie_name.into(),
            refresh_cookie_name: None,
        }
    }

    /// Uses `SESSION_COOKIE_NAME` and `REFRESH_COOKIE_NAME`.
    pub fn from_env(service: SessionService) -> Self {
        Self::new(service, SESSION_COOKIE_NAME.as_str())
            .with_refresh_cookie_name(REFRESH_COOKIE_NAME.as_str())
    }

    /// Name of the refresh credential cookie, used only to explain failed renewals in logs.
    pub fn with_refresh_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.refresh_cookie_name = Some(name.into());
        self
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn service(&self) -> &SessionService {
        &self.service
    }

    /// Decide whether the request carrying `headers` may reach a protected route.
    ///
    /// A session that was expired at decision time is always denied, even when
    /// the renewal it triggered succeeded; the renewed cookies ride along on the
    /// 401 so the client's next request gets through.
    pub async fn gate(&self, headers: &HeaderMap) -> GateDecision {
        let Some(token) = get_cookie_from_headers(headers, &self.cookie_name) else {
            return GateDecision::deny(DenyReason::MissingSession);
        };

        let cookie_header = raw_cookie_header(headers);
        let validation = match self
            .service
            .validate_or_refresh(&token, cookie_header.as_deref())
            .await
        {
            Ok(validation) => validation,
            Err(e) => {
                if matches!(e, SessionError::RefreshFailed { .. }) {
                    self.log_missing_refresh_cookie(headers);
                }
                self.log_failure(&token, &e);
                return GateDecision::deny(DenyReason::Unauthorized);
            }
        };
        if matches!(validation, Validation::Renewed { .. }) {
            self.log_missing_refresh_cookie(headers);
        }

        match validation {
            Validation::NotFound => {
                tracing::debug!("Unknown session token {}", redact_token(&token));
                GateDecision::deny(DenyReason::Unauthorized)
            }
            Validation::Valid(session) => GateDecision::Allow {
                user: AuthenticatedUser {
                    user_id: session.user_id,
                },
                set_cookies: Vec::new(),
            },
            Validation::Renewed {
                session,
                set_cookies,
                was_expired: true,
            } => {
                tracing::info!(
                    "Session for user {} was expired, renewal triggered with {} cookie(s)",
                    session.user_id,
                    set_cookies.len()
                );
                GateDecision::Deny {
                    reason: DenyReason::ExpiredRefreshTriggered,
                    set_cookies,
                }
            }
            Validation::Renewed {
                session,
                set_cookies,
                was_expired: false,
            } => {
                tracing::debug!(
                    "Session for user {} renewed ahead of expiry",
                    session.user_id
                );
                GateDecision::Allow {
                    user: AuthenticatedUser {
                        user_id: session.user_id,
                    },
                    set_cookies,
                }
            }
        }
    }

    /// Read-only validity probe. Never triggers a renewal and never sets cookies.
    pub async fn verify(&self, headers: &HeaderMap) -> VerifyResponse {
        let Some(token) = get_cookie_from_headers(headers, &self.cookie_name) else {
            return VerifyResponse::invalid(DenyReason::MissingSession);
        };

        match self.service.check_validity(&token).await {
            Ok(Some(session)) => VerifyResponse {
                valid: true,
                user_id: Some(session.user_id),
                error: None,
            },
            Ok(None) => VerifyResponse::invalid(DenyReason::InvalidOrExpired),
            Err(e) => {
                tracing::error!("Session verification failed: {}", e);
                VerifyResponse::invalid(DenyReason::InvalidOrExpired)
            }
        }
    }

    /// Configured refresh cookie name, when the request does not carry that cookie.
    fn missing_refresh_cookie(&self, headers: &HeaderMap) -> Option<&str> {
        let name = self.refresh_cookie_name.as_deref()?;
        get_cookie_from_headers(headers, name).is_none().then_some(name)
    }

    fn log_missing_refresh_cookie(&self, headers: &HeaderMap) {
        if let Some(name) = self.missing_refresh_cookie(headers) {
            tracing::debug!(
                "Renewal attempted without refresh cookie '{}' in the request",
                name
            );
        }
    }

    fn log_failure(&self, token: &str, err: &SessionError) {
        match err {
            SessionError::Storage(e) => {
                tracing::error!(
                    "Session store unavailable while validating {}: {}",
                    redact_token(token),
                    e
                );
            }
            SessionError::RefreshFailed {
                session,
                was_expired,
                source,
            } => {
                tracing::warn!(
                    "Renewal failed for user {} (expired: {}): {}",
                    session.user_id,
                    was_expired,
                    source
                );
            }
        }
    }
}
