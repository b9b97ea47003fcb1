//! QR generation handlers.
//!
//! `POST /api/qr` takes the web form as multipart data (text, two colors and
//! an optional logo file). `GET /api/qr` takes text and colors as query
//! parameters. Both return the PNG inline and keep a copy for download.

use axum::{
    extract::{Extension, Multipart, Query},
    response::Response,
};
use bytes::Bytes;
use qr_common::{Color, QrError, QrResult};
use qr_renderer::{GenerationRequest, Logo};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{png_response, ApiError};
use crate::metrics::Timer;
use crate::state::AppState;

/// Query parameters for `GET /api/qr`.
#[derive(Debug, Default, Deserialize)]
pub struct QrQuery {
    pub text: Option<String>,
    pub fill: Option<String>,
    pub back: Option<String>,
}

/// Parsed web form. Empty parts count as absent.
#[derive(Debug, Default)]
pub struct QrForm {
    pub text: Option<String>,
    pub fill_color: Option<String>,
    pub back_color: Option<String>,
    pub logo: Option<Bytes>,
}

impl QrForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = QrForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            match name.as_str() {
                "text" => form.text = Some(field.text().await?),
                "fill_color" => form.fill_color = non_empty(field.text().await?),
                "back_color" => form.back_color = non_empty(field.text().await?),
                "logo" => {
                    let data = field.bytes().await?;
                    form.logo = (!data.is_empty()).then_some(data);
                }
                _ => {
                    // Drain unknown parts
                    field.bytes().await?;
                }
            }
        }

        Ok(form)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_colors(fill: Option<&str>, back: Option<&str>) -> QrResult<(Color, Color)> {
    let foreground = match fill {
        Some(v) => Color::parse_param("fill_color", v)?,
        None => Color::BLACK,
    };
    let background = match back {
        Some(v) => Color::parse_param("back_color", v)?,
        None => Color::WHITE,
    };
    Ok((foreground, background))
}

/// POST /api/qr - Generate from the multipart web form
#[instrument(skip_all)]
pub async fn generate_form_handler(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    state.metrics.record_request();

    let form = QrForm::from_multipart(&mut multipart).await?;
    let (foreground, background) =
        parse_colors(form.fill_color.as_deref(), form.back_color.as_deref())?;
    let request = GenerationRequest::new(form.text.unwrap_or_default())
        .with_colors(foreground, background);

    render_and_store(&state, request, form.logo).await
}

/// GET /api/qr - Generate from query parameters (no logo)
#[instrument(skip_all)]
pub async fn generate_query_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<QrQuery>,
) -> Result<Response, ApiError> {
    state.metrics.record_request();

    let fill = query.fill.and_then(non_empty);
    let back = query.back.and_then(non_empty);
    let (foreground, background) = parse_colors(fill.as_deref(), back.as_deref())?;
    let request =
        GenerationRequest::new(query.text.unwrap_or_default()).with_colors(foreground, background);

    render_and_store(&state, request, None).await
}

/// Decode the logo, render and encode off the async workers, then store.
async fn render_and_store(
    state: &Arc<AppState>,
    request: GenerationRequest,
    logo: Option<Bytes>,
) -> Result<Response, ApiError> {
    let renderer = state.renderer.clone();
    let timer = Timer::start();

    let rendered = tokio::task::spawn_blocking(move || -> QrResult<_> {
        // Payload errors take precedence over logo errors
        request.validate()?;
        let request = match logo {
            Some(bytes) => request.with_logo(Logo::decode(&bytes)?),
            None => request,
        };
        let output = renderer.render(&request)?;
        let png = output.to_png()?;
        Ok((output, png, request.payload.len(), request.logo.is_some()))
    })
    .await
    .map_err(|e| QrError::Internal(format!("render task failed: {}", e)))?;

    let (output, png, payload_len, has_logo) = match rendered {
        Ok(rendered) => rendered,
        Err(e) => {
            state
                .metrics
                .record_render(timer.elapsed_us(), Some(e.error_code()))
                .await;
            return Err(e.into());
        }
    };
    state.metrics.record_render(timer.elapsed_us(), None).await;

    let id = state.downloads.save(&png).await?;

    info!(
        id = %id.simple(),
        payload_len = payload_len,
        has_logo = has_logo,
        version = output.version,
        width = output.width(),
        png_bytes = png.len(),
        duration_ms = timer.elapsed_ms(),
        "Generated QR code"
    );

    Ok(png_response(png, &id))
}
