//! HTTP surface for the blood-request service.
//!
//! Routes are nested under `/api/` and pass through the identity
//! middleware, which resolves the trusted gateway header into an
//! `AuthContext` before handlers run.
//!
//! The router is composable: `api_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::serve;
pub use types::ApiContext;
