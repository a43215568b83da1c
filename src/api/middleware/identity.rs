//! Trusted-header identity middleware.
//!
//! The identity provider sits upstream (an authenticating gateway);
//! by the time a request reaches this service, the caller's resolved
//! user id travels in a trusted header named in config. The middleware
//! injects an `AuthContext` extension either way: an absent or
//! unreadable header yields an unauthenticated context, and the
//! orchestrator decides whether the payload's own `userId` field can
//! stand in.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::ApiContext;
use crate::orchestrator::AuthContext;

pub async fn resolve_identity(mut req: Request, next: Next) -> Response {
    let header_name = req
        .extensions()
        .get::<ApiContext>()
        .map(|ctx| ctx.core.config.user_id_header.clone())
        .unwrap_or_else(|| "x-user-id".to_string());

    let user_id = req
        .headers()
        .get(&header_name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    if let Some(ref id) = user_id {
        tracing::debug!(user_id = %id, "Authenticated caller resolved");
    }

    req.extensions_mut().insert(AuthContext { user_id });
    next.run(req).await
}
