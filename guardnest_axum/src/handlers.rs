use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode};
use serde::Serialize;

use super::session::AuthUser;
use guardnest::AuthGate;

#[derive(Debug, Serialize)]
pub(crate) struct PublicResponse {
    message: &'static str,
    time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SecureResponse {
    message: &'static str,
    user_id: String,
    time: DateTime<Utc>,
}

pub(crate) async fn public() -> Json<PublicResponse> {
    Json(PublicResponse {
        message: "public ok",
        time: Utc::now(),
    })
}

pub(crate) async fn secure(user: AuthUser) -> Json<SecureResponse> {
    Json(SecureResponse {
        message: "secure ok",
        user_id: user.user_id,
        time: Utc::now(),
    })
}

pub(crate) async fn verify(State(gate): State<AuthGate>, headers: HeaderMap) -> Response {
    let body = gate.verify(&headers).await;
    let status = if body.valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(body)).into_response()
}

pub(crate) async fn healthz() -> StatusCode {
    StatusCode::NO_CONTENT
}
