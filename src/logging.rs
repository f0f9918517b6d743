//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::{FromRequest, Request},
    http::{
        HeaderMap, StatusCode,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{Error, session::COOKIE_SESSION_ID};

/// Bodies longer than this many characters are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Response bodies larger than this many bytes, or of unknown size, are
/// passed through without being buffered or logged.
pub const LOG_RESPONSE_READ_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// The session cookie is redacted from the logged headers.
///
/// The request body is read with the same limit as axum's body extractors
/// (2 MiB unless a `DefaultBodyLimit` layer says otherwise). Larger requests
/// are answered with `413 Payload Too Large` without reaching the handler.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match Bytes::from_request(Request::from_parts(parts.clone(), body), &()).await {
        Ok(body) => body,
        Err(rejection) => {
            tracing::error!("Could not read request body: {rejection}");
            return match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => Error::PayloadTooLarge.into_response(),
                _ => rejection.into_response(),
            };
        }
    };
    log_message(
        &format!("Received request: {} {}", parts.method, parts.uri),
        &parts.headers,
        &body,
    );

    let request = Request::from_parts(parts, Body::from(body));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let summary = format!("Sending response: {}", parts.status);

    let fits_limit = body
        .size_hint()
        .exact()
        .is_some_and(|length| length <= LOG_RESPONSE_READ_LIMIT as u64);
    if !fits_limit {
        let headers = redact_headers(&parts.headers);
        tracing::info!("{summary}\nheaders: {headers:#?}\nbody: <not logged>");
        return Response::from_parts(parts, body);
    }

    let body = match axum::body::to_bytes(body, LOG_RESPONSE_READ_LIMIT).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_message(&summary, &parts.headers, &body);

    Response::from_parts(parts, Body::from(body))
}

fn log_message(summary: &str, headers: &HeaderMap, body: &Bytes) {
    let headers = redact_headers(headers);
    let body = String::from_utf8_lossy(body);

    if body.chars().count() > LOG_BODY_LENGTH_LIMIT {
        let truncated: String = body.chars().take(LOG_BODY_LENGTH_LIMIT).collect();
        tracing::info!("{summary}\nheaders: {headers:#?}\nbody: {truncated}...");
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{summary}\nheaders: {headers:#?}\nbody: {body:?}");
    }
}

fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes());
            let value = if name == COOKIE || name == SET_COOKIE {
                redact_cookie(&value, COOKIE_SESSION_ID)
            } else {
                value.into_owned()
            };

            (name.to_string(), value)
        })
        .collect()
}

/// Replace the value of the cookie `cookie_name` in a `Cookie` or `Set-Cookie`
/// header value.
fn redact_cookie(header_value: &str, cookie_name: &str) -> String {
    let prefix = format!("{cookie_name}=");

    header_value
        .split(';')
        .map(|pair| {
            let trimmed = pair.trim_start();

            if trimmed.starts_with(&prefix) {
                let leading_whitespace = &pair[..pair.len() - trimmed.len()];
                format!("{leading_whitespace}{prefix}********")
            } else {
                pair.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}
