//! Repository layer: entity-scoped database operations.

mod donor;
mod request;

pub use donor::*;
pub use request::*;
