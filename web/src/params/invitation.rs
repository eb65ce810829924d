use domain::invitation::{NewInvitation, Profile};
use serde::Deserialize;
use utoipa::ToSchema;

/// Body for issuing an invitation.
///
/// `contactId` and `eventId` are required; they are optional here so a missing
/// value is reported with the same JSON error shape as other bad requests.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    pub contact_id: Option<String>,
    pub event_id: Option<String>,
    /// Lifetime in minutes; missing or non-positive uses the configured default (7 days).
    pub ttl_minutes: Option<f64>,
    /// Absolute expiration in milliseconds since the Unix epoch. Wins over `ttlMinutes`.
    pub expires_at: Option<i64>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
}

impl From<CreateParams> for NewInvitation {
    fn from(params: CreateParams) -> Self {
        NewInvitation {
            contact_id: params.contact_id,
            event_id: params.event_id,
            ttl_minutes: params.ttl_minutes,
            expires_at: params.expires_at,
            profile: Profile {
                full_name: params.full_name,
                first_name: params.first_name,
                last_name: params.last_name,
                email: params.email,
                organization: params.organization,
            },
        }
    }
}
