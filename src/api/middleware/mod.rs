//! API middleware.
//!
//! Identity resolution runs before every handler so requester identity
//! is available as an `AuthContext` extension.

pub mod identity;
