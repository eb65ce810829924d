//! HTTP layer for event invitations.
//!
//! - `POST /api/qr` issues an invitation and returns its token, links and QR data URL
//! - `GET /api/qr.png` renders a PNG QR code for a token, URL, free-form text or new invitation
//! - `GET /invite` renders the invitation page for a token
//! - `GET /health`, plus the OpenAPI document and RapiDoc UI

use axum::http::{header, HeaderValue, Method};
use log::*;
use service::config::Config;
use tower_http::cors::CorsLayer;

mod controller;
mod error;
mod params;
mod response;
pub mod router;

pub use error::Error;
pub use service::AppState;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let listen_addr = format!("{}:{}", interface, app_state.config.port);

    let cors_layer = cors_layer(&app_state.config);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    info!("Server starting... listening for connections on http://{listen_addr}");

    axum::serve(listener, router::define_routes(app_state).layer(cors_layer)).await
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
