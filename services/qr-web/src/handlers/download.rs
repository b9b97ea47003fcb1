//! Download handler for previously generated codes.

use axum::{
    extract::{Extension, Path},
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::common::{attachment_response, ApiError};
use crate::state::AppState;

/// GET /download/:id - Serve a stored PNG as an attachment
#[instrument(skip(state))]
pub async fn download_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let (id, png) = state.downloads.open(&id).await?;
    state.metrics.record_download();
    debug!(id = %id.simple(), bytes = png.len(), "Serving download");
    Ok(attachment_response(png, &id))
}
