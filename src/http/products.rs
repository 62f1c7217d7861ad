//! `/products` resource handler.
//!
//! # Dispatch
//! ```text
//! GET  → list_products   (200 JSON array | 500)
//! POST → add_product     (201 JSON entity | 400 | 409 with unique ids)
//! PUT  → update_product  (200 JSON entity | 400)
//! *    → 405, empty body
//! ```
//!
//! # Design Decisions
//! - Each method maps to one function with a narrow contract
//! - Decode fully before touching the store: a rejected request never mutates
//! - PUT looks up and replaces under one store lock

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::catalog::codec;
use crate::http::error::ApiError;
use crate::http::request::read_body;
use crate::http::server::AppState;
use crate::observability::metrics;

/// The methods `/products` distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductMethod {
    Get,
    Post,
    Put,
    Unsupported,
}

impl From<&Method> for ProductMethod {
    fn from(method: &Method) -> Self {
        match *method {
            Method::GET => ProductMethod::Get,
            Method::POST => ProductMethod::Post,
            Method::PUT => ProductMethod::Put,
            _ => ProductMethod::Unsupported,
        }
    }
}

/// Entry point for every request on `/products`.
pub async fn product_resource(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();

    let result = match ProductMethod::from(&method) {
        ProductMethod::Get => list_products(&state),
        ProductMethod::Post => add_product(&state, request.into_body()).await,
        ProductMethod::Put => update_product(&state, request.into_body()).await,
        ProductMethod::Unsupported => Err(ApiError::MethodNotAllowed(method)),
    };

    result.unwrap_or_else(IntoResponse::into_response)
}

fn list_products(state: &AppState) -> Result<Response, ApiError> {
    tracing::debug!("Handling GET /products");
    let body = state.store.view(codec::encode)?;
    Ok(json_response(StatusCode::OK, body))
}

async fn add_product(state: &AppState, body: Body) -> Result<Response, ApiError> {
    tracing::debug!("Handling POST /products");
    let bytes = read_body(body, state.max_body_size).await?;
    let product = codec::decode(&bytes)?;

    if state.unique_ids {
        state.store.append_unique(product.clone())?;
    } else {
        state.store.append(product.clone());
    }
    metrics::record_catalog_size(state.store.len());

    tracing::info!(
        id = product.id,
        name = %product.name,
        price = product.price,
        sku = %product.sku,
        "Product added"
    );

    Ok(json_response(StatusCode::CREATED, codec::encode_one(&product)?))
}

async fn update_product(state: &AppState, body: Body) -> Result<Response, ApiError> {
    tracing::debug!("Handling PUT /products");
    let bytes = read_body(body, state.max_body_size).await?;
    let product = codec::decode(&bytes)?;

    let stored = state.store.update(product)?;

    tracing::info!(
        id = stored.id,
        name = %stored.name,
        price = stored.price,
        sku = %stored.sku,
        "Product updated"
    );

    Ok(json_response(StatusCode::OK, codec::encode_one(&stored)?))
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
