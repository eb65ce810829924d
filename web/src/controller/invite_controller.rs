use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use domain::invitation as InvitationApi;
use log::*;

use crate::params::invite::InvitePageParams;
use crate::response::invite_page;
use crate::AppState;

/// GET the invitation page for a token
///
/// Every rejected token renders the same page; the reason is only logged.
#[utoipa::path(
    get,
    path = "/invite",
    params(InvitePageParams),
    responses(
        (status = 200, description = "Invitation page, valid or not", content_type = "text/html", body = String)
    )
)]
pub async fn show(
    State(app_state): State<AppState>,
    query: Result<Query<InvitePageParams>, QueryRejection>,
) -> Html<String> {
    let token = match query {
        Ok(Query(params)) => params.token.unwrap_or_default(),
        Err(rejection) => {
            debug!("Invitation query rejected: {}", rejection.body_text());
            return Html(invite_page::render_invalid());
        }
    };

    match InvitationApi::validate(app_state.signer_ref(), &token) {
        Ok(invitation) => {
            debug!(
                "Invitation for event {:?} presented, valid until {}",
                invitation.event_id, invitation.expires_at
            );
            Html(invite_page::render_valid(&invitation))
        }
        Err(e) if e.is_invalid_invitation() => {
            debug!("Invitation rejected: {:?}", e.error_kind);
            Html(invite_page::render_invalid())
        }
        Err(e) => {
            warn!("Failed to validate invitation: {e}");
            Html(invite_page::render_invalid())
        }
    }
}
