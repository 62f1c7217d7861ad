//! Request failures and their HTTP mapping.
//!
//! | Variant            | Status | Body               |
//! |--------------------|--------|--------------------|
//! | `BodyRead`         | 400    | [`BAD_REQUEST_MSG`] |
//! | `InvalidPayload`   | 400    | [`DECODE_MSG`]      |
//! | `UnknownId`        | 400    | [`ID_NOT_FOUND_MSG`] |
//! | `DuplicateId`      | 409    | [`DUPLICATE_ID_MSG`] |
//! | `Serialization`    | 500    | [`ENCODE_MSG`]      |
//! | `Internal`         | 500    | [`INTERNAL_MSG`]    |
//! | `MethodNotAllowed` | 405    | empty               |

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::{CodecError, StoreError};

pub const BAD_REQUEST_MSG: &str = "Bad Request";
pub const DECODE_MSG: &str = "Unable to unmarshal request body JSON";
pub const ID_NOT_FOUND_MSG: &str = "ID not found";
pub const DUPLICATE_ID_MSG: &str = "ID already exists";
pub const ENCODE_MSG: &str = "Unable to marshal products to JSON";
pub const INTERNAL_MSG: &str = "Internal Server Error";

/// Methods served on `/products`, advertised on 405.
const PRODUCT_METHODS: &str = "GET, POST, PUT";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The body could not be read (I/O failure or over the size limit).
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    /// The body is not a product in JSON form.
    #[error("invalid product payload: {0}")]
    InvalidPayload(#[source] CodecError),

    /// PUT named an id that is not in the catalog.
    #[error("product {0} not found")]
    UnknownId(i64),

    /// POST named an id that is already taken (unique ids only).
    #[error("product {0} already exists")]
    DuplicateId(i64),

    /// The response could not be encoded.
    #[error("failed to encode response: {0}")]
    Serialization(#[source] CodecError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BodyRead(_) | ApiError::InvalidPayload(_) | ApiError::UnknownId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::DuplicateId(_) => StatusCode::CONFLICT,
            ApiError::Serialization(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Fixed client-facing message; `None` means an empty body.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ApiError::BodyRead(_) => Some(BAD_REQUEST_MSG),
            ApiError::InvalidPayload(_) => Some(DECODE_MSG),
            ApiError::UnknownId(_) => Some(ID_NOT_FOUND_MSG),
            ApiError::DuplicateId(_) => Some(DUPLICATE_ID_MSG),
            ApiError::Serialization(_) => Some(ENCODE_MSG),
            ApiError::Internal(_) => Some(INTERNAL_MSG),
            ApiError::MethodNotAllowed(_) => None,
        }
    }
}

impl From<CodecError> for ApiError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Decode(_) => ApiError::InvalidPayload(err),
            CodecError::Encode(_) => ApiError::Serialization(err),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::UnknownId(id),
            StoreError::DuplicateId(id) => ApiError::DuplicateId(id),
            StoreError::IndexOutOfRange { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        match (&self, self.message()) {
            (ApiError::MethodNotAllowed(_), _) => {
                (status, [(header::ALLOW, PRODUCT_METHODS)]).into_response()
            }
            (_, Some(message)) => (status, message).into_response(),
            (_, None) => status.into_response(),
        }
    }
}
