use domain::invitation::{NewInvitation, Profile};
use domain::qr::QrSource;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the PNG QR endpoint.
///
/// Sources are tried in order: `text`, `invite`, `token`, then `contactId` and
/// `eventId` with optional profile fields for a freshly issued invitation.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub(crate) struct QrImageParams {
    /// Free-form text to encode verbatim.
    pub(crate) text: Option<String>,
    /// A prebuilt invitation URL to encode verbatim.
    pub(crate) invite: Option<String>,
    /// An invitation token; its invitation URL is encoded.
    pub(crate) token: Option<String>,
    pub(crate) contact_id: Option<String>,
    pub(crate) event_id: Option<String>,
    pub(crate) ttl_minutes: Option<f64>,
    pub(crate) full_name: Option<String>,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) organization: Option<String>,
}

impl QrImageParams {
    /// Picks what the QR image should encode, if anything was supplied.
    pub(crate) fn into_source(self) -> Option<QrSource> {
        let present = |value: Option<String>| value.filter(|value| !value.is_empty());

        if let Some(text) = present(self.text) {
            return Some(QrSource::Text(text));
        }
        if let Some(invite) = present(self.invite) {
            return Some(QrSource::InviteUrl(invite));
        }
        if let Some(token) = present(self.token) {
            return Some(QrSource::Token(token));
        }

        match (present(self.contact_id), present(self.event_id)) {
            (Some(contact_id), Some(event_id)) => Some(QrSource::Invitation(NewInvitation {
                contact_id: Some(contact_id),
                event_id: Some(event_id),
                ttl_minutes: self.ttl_minutes,
                expires_at: None,
                profile: Profile {
                    full_name: self.full_name,
                    first_name: self.first_name,
                    last_name: self.last_name,
                    email: self.email,
                    organization: self.organization,
                },
            })),
            _ => None,
        }
    }
}
