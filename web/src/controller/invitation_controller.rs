use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::error::{invitation_error, InvitationErrorKind};
use domain::invitation as InvitationApi;
use log::*;

use crate::params::invitation::CreateParams;
use crate::response::invitation::CreatedInvitation;
use crate::response::ErrorResponse;
use crate::{AppState, Error};

/// POST issue a new invitation and its QR code
#[utoipa::path(
    post,
    path = "/api/qr",
    request_body = CreateParams,
    responses(
        (status = 200, description = "Successfully issued an invitation", body = CreatedInvitation),
        (status = 400, description = "Missing contactId or eventId, or an invalid body", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    body: Result<Json<CreateParams>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(params) = body.map_err(|rejection| {
        invitation_error(InvitationErrorKind::InvalidRequest, &rejection.body_text())
    })?;

    debug!(
        "POST issue invitation for contact {:?} to event {:?}",
        params.contact_id, params.event_id
    );

    let issued = InvitationApi::issue(
        app_state.signer_ref(),
        &app_state.config,
        params.into(),
    )?;

    Ok(Json(CreatedInvitation::from(issued)))
}
