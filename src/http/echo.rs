//! Diagnostic echo handlers.
//!
//! Both read the whole body, log it and answer with a short text derived
//! from it. They never touch the product store. The body is echoed byte for
//! byte; only the log line is lossily decoded.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::error::ApiError;
use crate::http::request::read_body;
use crate::http::server::AppState;

/// Handler for `/` and every unmatched path.
pub async fn default_echo(
    State(state): State<AppState>,
    body: Body,
) -> Result<Response, ApiError> {
    let data = read_body(body, state.max_body_size).await?;
    tracing::info!(data = %String::from_utf8_lossy(&data), "Default handler received request");

    Ok(text_response(b"\n(/) Data: ", &data))
}

/// Handler for `/helloworld`.
pub async fn hello(
    State(state): State<AppState>,
    body: Body,
) -> Result<Response, ApiError> {
    let data = read_body(body, state.max_body_size).await?;
    tracing::info!(data = %String::from_utf8_lossy(&data), "Hello handler received request");

    Ok(text_response(b"Hello ", &data))
}

fn text_response(prefix: &[u8], data: &Bytes) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        [prefix, data.as_ref()].concat(),
    )
        .into_response()
}
