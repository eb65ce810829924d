//! Response bodies returned by the web layer.

use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod invitation;
pub(crate) mod invite_page;

/// JSON body returned when a request fails.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { ok: false, error }
    }
}
