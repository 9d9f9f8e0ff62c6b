use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::{HeaderValue, StatusCode, header::SET_COOKIE};
use serde::Serialize;

use guardnest::DenyReason;

/// JSON body of every 401 returned by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: DenyReason,
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Appends each renewed cookie as its own `Set-Cookie` field.
pub(crate) fn append_set_cookies(response: &mut Response, set_cookies: Vec<HeaderValue>) {
    let headers = response.headers_mut();
    for cookie in set_cookies {
        headers.append(SET_COOKIE, cookie);
    }
}

pub(crate) fn deny_response(reason: DenyReason, set_cookies: Vec<HeaderValue>) -> Response {
    let mut response = ErrorBody { error: reason }.into_response();
    append_set_cookies(&mut response, set_cookies);
    response
}
