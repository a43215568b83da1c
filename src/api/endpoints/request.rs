//! Submit blood request endpoint.

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{RequestSummary, SubmitRequest};
use crate::orchestrator::{self, AuthContext};

/// `POST /api/request`: submit a blood request.
///
/// Runs the full pipeline: validate, resolve location, match donors,
/// persist, fan out notifications, summarize.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<RequestSummary>, ApiError> {
    let summary = orchestrator::process_request(&ctx.core, &auth, payload).await?;
    Ok(Json(summary))
}
