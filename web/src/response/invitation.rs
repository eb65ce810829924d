use domain::invitation::IssuedInvitation;
use serde::Serialize;
use utoipa::ToSchema;

/// A newly issued invitation and its links.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvitation {
    /// Always `true`.
    pub ok: bool,
    /// Link to the invitation page.
    pub invite_url: String,
    /// PNG QR code of `inviteUrl` as a `data:` URL.
    pub qr_data_url: String,
    /// Link to the PNG QR image for this token.
    pub qr_png_url: String,
    /// The signed invitation token.
    pub token: String,
}

impl From<IssuedInvitation> for CreatedInvitation {
    fn from(issued: IssuedInvitation) -> Self {
        Self {
            ok: true,
            invite_url: issued.invite_url,
            qr_data_url: issued.qr_data_url,
            qr_png_url: issued.qr_png_url,
            token: issued.token,
        }
    }
}
