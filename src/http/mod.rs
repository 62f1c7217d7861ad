//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, bounded body read)
//!     → path match:
//!         /products   → products.rs (GET / POST / PUT, else 405)
//!         /helloworld → echo.rs (hello)
//!         / and rest  → echo.rs (default echo)
//!     → error.rs (ApiError → status + fixed message)
//!     → Send to client
//! ```

pub mod echo;
pub mod error;
pub mod middleware;
pub mod products;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use products::ProductMethod;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
