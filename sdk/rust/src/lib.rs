//! Typed HTTP client for the product catalog service.

pub mod client;

pub use client::{CatalogClient, Product};
