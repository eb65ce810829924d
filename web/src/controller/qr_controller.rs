use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use domain::qr::{self as QrApi, QrSource};
use log::*;

use crate::params::qr::QrImageParams;
use crate::AppState;

const IMMUTABLE: &str = "public, max-age=31536000, immutable";
const NO_STORE: &str = "no-store";

/// GET a PNG QR code for a token, an invitation URL or free-form text
#[utoipa::path(
    get,
    path = "/api/qr.png",
    params(QrImageParams),
    responses(
        (status = 200, description = "PNG QR image", content_type = "image/png", body = Vec<u8>),
        (status = 400, description = "Nothing to encode, or the content does not fit a QR code", body = String)
    )
)]
pub async fn png(
    State(app_state): State<AppState>,
    query: Result<Query<QrImageParams>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => {
            debug!("QR query rejected: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, "bad request").into_response();
        }
    };

    let Some(source) = params.into_source() else {
        return (StatusCode::BAD_REQUEST, "Missing token or invite").into_response();
    };

    // Freshly issued invitations carry a new token on every request.
    let cache_control = match source {
        QrSource::Invitation(_) => NO_STORE,
        _ => IMMUTABLE,
    };

    match QrApi::render_source(app_state.signer_ref(), &app_state.config, source) {
        Ok(png) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/png".to_string()),
                (header::CONTENT_LENGTH, png.len().to_string()),
                (header::CACHE_CONTROL, cache_control.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    "inline; filename=\"qr.png\"".to_string(),
                ),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            ],
            png,
        )
            .into_response(),
        Err(e) => {
            warn!("Failed to render QR image: {e}");
            (StatusCode::BAD_REQUEST, "bad request").into_response()
        }
    }
}
