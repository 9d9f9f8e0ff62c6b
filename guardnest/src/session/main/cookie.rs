use headers::{Cookie, HeaderMapExt};
use http::header::{COOKIE, HeaderMap};

/// Value of the cookie named `cookie_name`, if present and non-empty.
pub(crate) fn get_cookie_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let Some(cookies) = headers.typed_get::<Cookie>() else {
        tracing::debug!("No cookie header found");
        return None;
    };

    match cookies.get(cookie_name) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => {
            tracing::debug!("No cookie '{}' found in cookies", cookie_name);
            None
        }
    }
}

/// The request's entire `Cookie` header, to be forwarded untouched.
///
/// HTTP/2 clients may split cookies across several header fields; those are
/// joined back with `"; "`. Fields holding non-visible-ASCII bytes cannot be
/// forwarded as text and are dropped with a warning.
pub(crate) fn raw_cookie_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| match v.to_str() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(
                    "Dropping Cookie header field with {} non-ASCII byte(s) from the forwarded header",
                    v.as_bytes().iter().filter(|b| !b.is_ascii()).count()
                );
                None
            }
        })
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join("; "))
    }
}

/// Shortened token for log lines; session tokens are credentials.
pub(crate) fn redact_token(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}***")
}
