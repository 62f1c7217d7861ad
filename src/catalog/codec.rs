//! JSON boundary between wire bytes and [`Product`].
//!
//! The wire form carries `id`, `name`, `description`, `price` and `sku`.
//! Timestamps are never read from or written to the wire.

use std::io::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::product::Product;

/// Codec failures.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Payload is not well-formed JSON in the product shape.
    #[error("failed to decode product: {0}")]
    Decode(#[source] serde_json::Error),

    /// Products could not be serialized or written.
    #[error("failed to encode products: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Wire representation of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub sku: String,
}

impl From<ProductPayload> for Product {
    fn from(payload: ProductPayload) -> Self {
        Product::new(
            payload.id,
            payload.name,
            payload.description,
            payload.price,
            payload.sku,
        )
    }
}

impl From<&Product> for ProductPayload {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            sku: product.sku.clone(),
        }
    }
}

/// Borrowing twin of [`ProductPayload`] so encoding never clones strings.
#[derive(Serialize)]
struct ProductView<'a> {
    id: i64,
    name: &'a str,
    description: &'a str,
    price: f64,
    sku: &'a str,
}

impl<'a> From<&'a Product> for ProductView<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: product.id,
            name: &product.name,
            description: &product.description,
            price: product.price,
            sku: &product.sku,
        }
    }
}

/// Decode a request body into a freshly stamped product.
pub fn decode(bytes: &[u8]) -> Result<Product, CodecError> {
    let payload: ProductPayload = serde_json::from_slice(bytes).map_err(CodecError::Decode)?;
    Ok(payload.into())
}

/// Encode products as a JSON array followed by a newline.
pub fn encode(products: &[Product]) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(products.len() * 96 + 2);
    encode_to(&mut buf, products)?;
    Ok(buf)
}

/// Stream products as a JSON array followed by a newline into `writer`.
pub fn encode_to<W: Write>(mut writer: W, products: &[Product]) -> Result<(), CodecError> {
    let views: Vec<ProductView<'_>> = products.iter().map(ProductView::from).collect();
    serde_json::to_writer(&mut writer, &views).map_err(CodecError::Encode)?;
    writer
        .write_all(b"\n")
        .map_err(|e| CodecError::Encode(serde_json::Error::io(e)))
}

/// Encode a single product as a JSON object.
pub fn encode_one(product: &Product) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(&ProductView::from(product)).map_err(CodecError::Encode)
}
