//! Claims signed into invitation tokens issued by this service.
//!
//! Field order here is the order keys appear in the signed JSON, so issuing the
//! same invitation twice yields byte-identical tokens.

use serde::{Deserialize, Serialize};

/// Optional profile fields carried under `meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Profile {
    /// Drops blank fields; returns `None` when nothing is left.
    pub(crate) fn non_empty(self) -> Option<Self> {
        let keep = |field: Option<String>| field.filter(|value| !value.trim().is_empty());
        let profile = Profile {
            full_name: keep(self.full_name),
            first_name: keep(self.first_name),
            last_name: keep(self.last_name),
            email: keep(self.email),
            organization: keep(self.organization),
        };

        (profile != Profile::default()).then_some(profile)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvitationClaims {
    pub(crate) contact_id: String,
    pub(crate) event_id: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) meta: Option<Profile>,
}
