use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the invitation page.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct InvitePageParams {
    /// The invitation token.
    pub(crate) token: Option<String>,
}
