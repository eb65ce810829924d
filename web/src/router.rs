use crate::{params, response, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::controller::{
    health_check_controller, invitation_controller, invite_controller, qr_controller,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Event Invitations API"
        ),
        paths(
            health_check_controller::health_check,
            invitation_controller::create,
            invite_controller::show,
            qr_controller::png,
        ),
        components(
            schemas(
                params::invitation::CreateParams,
                response::invitation::CreatedInvitation,
                response::ErrorResponse,
            )
        ),
        tags(
            (name = "invite_platform_rs", description = "Signed event invitations and QR codes")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    let static_dir = app_state.config.static_dir.clone();

    Router::new()
        .merge(health_routes())
        .merge(invitation_routes(app_state.clone()))
        .merge(qr_routes(app_state.clone()))
        .merge(invite_page_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback_service(static_routes(&static_dir))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn invitation_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/qr", post(invitation_controller::create))
        .with_state(app_state)
}

fn qr_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/qr.png", get(qr_controller::png))
        .with_state(app_state)
}

fn invite_page_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/invite", get(invite_controller::show))
        .with_state(app_state)
}

// Serves the invitation page's logo and background images.
fn static_routes(static_dir: &str) -> ServeDir {
    ServeDir::new(static_dir)
}
