//! Issuing and validating event invitations.
//!
//! An invitation is never stored: issuing one signs its claims into a token and
//! returns the links built from that token, and validating one verifies the
//! token and checks its `exp` instant. Every failure mode of validation is
//! reported as an error so the caller can present a single "invitation not
//! valid" outcome.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::invitation::{self as InvitationApi, NewInvitation};
//!
//! let issued = InvitationApi::issue(app_state.signer_ref(), &app_state.config, request)?;
//! let invitation = InvitationApi::validate(app_state.signer_ref(), &issued.token)?;
//! ```

use invite_token::{is_expired_at, now_ms, Payload, Signer};
use log::*;
use serde::Serialize;
use serde_json::Value;
use service::config::Config;

use crate::error::{invitation_error, Error, InvitationErrorKind};
use crate::links;
use crate::qr::{self, QrOptions};
use claims::InvitationClaims;

pub use claims::Profile;

pub(crate) mod claims;

const MS_PER_MINUTE: f64 = 60.0 * 1000.0;

/// A request to issue an invitation.
#[derive(Debug, Clone, Default)]
pub struct NewInvitation {
    pub contact_id: Option<String>,
    pub event_id: Option<String>,
    /// Lifetime in minutes. Missing or non-positive values fall back to the
    /// configured default.
    pub ttl_minutes: Option<f64>,
    /// Absolute expiration instant in ms since the Unix epoch. Takes precedence
    /// over `ttl_minutes`.
    pub expires_at: Option<i64>,
    pub profile: Profile,
}

/// A freshly issued invitation and the links derived from its token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedInvitation {
    pub invite_url: String,
    pub qr_data_url: String,
    pub qr_png_url: String,
    pub token: String,
}

/// A verified, unexpired invitation ready to be shown to its holder.
#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    pub contact_id: Option<String>,
    pub event_id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub issued_at: Option<i64>,
    pub expires_at: i64,
}

/// Issues an invitation valid from now.
pub fn issue(
    signer: &Signer,
    config: &Config,
    request: NewInvitation,
) -> Result<IssuedInvitation, Error> {
    issue_at(signer, config, request, now_ms())
}

/// Issues an invitation as of `now` (ms since the Unix epoch) and renders the
/// QR code for its invitation link.
pub fn issue_at(
    signer: &Signer,
    config: &Config,
    request: NewInvitation,
    now: i64,
) -> Result<IssuedInvitation, Error> {
    let token = sign_at(signer, config, request, now)?;

    let invite_url = links::invite_url(config.public_base_url(), &token);
    let png = qr::render_png(&invite_url, QrOptions::from(config))?;

    Ok(IssuedInvitation {
        qr_data_url: qr::to_data_url(&png),
        qr_png_url: links::qr_png_url(config.public_base_url(), &token),
        invite_url,
        token,
    })
}

/// Signs the claims for `request` as of `now` and returns the token only.
pub fn sign_at(
    signer: &Signer,
    config: &Config,
    request: NewInvitation,
    now: i64,
) -> Result<String, Error> {
    let (contact_id, event_id) = match (
        required(request.contact_id),
        required(request.event_id),
    ) {
        (Some(contact_id), Some(event_id)) => (contact_id, event_id),
        _ => {
            return Err(invitation_error(
                InvitationErrorKind::InvalidRequest,
                "Missing contactId or eventId",
            ))
        }
    };

    let exp = expiration(
        config.default_ttl_minutes,
        request.ttl_minutes,
        request.expires_at,
        now,
    )?;

    let claims = InvitationClaims {
        contact_id,
        event_id,
        iat: now,
        exp,
        meta: request.profile.non_empty(),
    };

    let token = signer.sign_claims(&claims)?;
    info!(
        "Issued invitation for contact {} to event {} valid until {}",
        claims.contact_id, claims.event_id, claims.exp
    );

    Ok(token)
}

/// Validates a token presented now.
pub fn validate(signer: &Signer, token: &str) -> Result<Invitation, Error> {
    validate_at(signer, token, now_ms())
}

/// Verifies `token`, then rejects it if its `exp` is before `now`.
pub fn validate_at(signer: &Signer, token: &str, now: i64) -> Result<Invitation, Error> {
    if token.is_empty() {
        return Err(invitation_error(
            InvitationErrorKind::MalformedToken,
            "Missing token",
        ));
    }

    let payload = signer.verify(token)?;

    let exp = payload.get("exp").and_then(timestamp).ok_or_else(|| {
        invitation_error(
            InvitationErrorKind::InvalidPayload,
            "Invitation has no numeric exp",
        )
    })?;

    if is_expired_at(exp, now) {
        return Err(invitation_error(
            InvitationErrorKind::Expired,
            "Invitation expired",
        ));
    }

    Ok(Invitation::from_payload(&payload, exp))
}

impl Invitation {
    fn from_payload(payload: &Payload, expires_at: i64) -> Self {
        let meta = payload.get("meta").and_then(Value::as_object);
        let meta_field = |key: &str| meta.and_then(|meta| text(meta.get(key)));

        let display_name = meta_field("fullName").or_else(|| {
            let name = [meta_field("firstName"), meta_field("lastName")]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            (!name.is_empty()).then_some(name)
        });

        Invitation {
            contact_id: text(payload.get("contactId")),
            event_id: text(payload.get("eventId")),
            display_name,
            email: meta_field("email"),
            organization: meta_field("organization"),
            issued_at: payload.get("iat").and_then(timestamp),
            expires_at,
        }
    }
}

fn expiration(
    default_ttl_minutes: u64,
    ttl_minutes: Option<f64>,
    expires_at: Option<i64>,
    now: i64,
) -> Result<i64, Error> {
    if let Some(expires_at) = expires_at {
        if expires_at <= now {
            return Err(invitation_error(
                InvitationErrorKind::InvalidRequest,
                "expiresAt must be in the future",
            ));
        }
        return Ok(expires_at);
    }

    let ttl_ms = match ttl_minutes {
        Some(minutes) if minutes.is_finite() && minutes > 0.0 => minutes * MS_PER_MINUTE,
        _ => default_ttl_minutes as f64 * MS_PER_MINUTE,
    };

    Ok(now.saturating_add(ttl_ms as i64))
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn timestamp(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|ms| ms.floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use secrecy::SecretString;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;
    const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

    fn signer(secret: &str) -> Signer {
        Signer::new(SecretString::from(secret.to_string())).unwrap()
    }

    fn config() -> Config {
        let mut config = Config::from_env()
            .set_hmac_secret("dev_secret".to_string())
            .set_public_base_url("http://localhost:3000".to_string());
        config.default_ttl_minutes = 60 * 24 * 7;
        config.qr_width = 128;
        config
    }

    fn request() -> NewInvitation {
        NewInvitation {
            contact_id: Some("c1".to_string()),
            event_id: Some("evt1".to_string()),
            ..NewInvitation::default()
        }
    }

    fn invitation_kind(err: &Error) -> &InvitationErrorKind {
        match &err.error_kind {
            DomainErrorKind::Invitation(kind) => kind,
            other => panic!("expected invitation error, got {other:?}"),
        }
    }

    #[test]
    fn test_issue_builds_links_from_token() {
        let issued = issue_at(&signer("dev_secret"), &config(), request(), NOW).unwrap();

        let encoded = urlencoding::encode(&issued.token).into_owned();
        assert_eq!(
            issued.invite_url,
            format!("http://localhost:3000/invite?token={encoded}")
        );
        assert_eq!(
            issued.qr_png_url,
            format!("http://localhost:3000/api/qr.png?token={encoded}")
        );
        assert!(issued.qr_data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_issue_uses_default_ttl() {
        let signer = signer("dev_secret");
        let token = sign_at(&signer, &config(), request(), NOW).unwrap();
        let payload = signer.verify(&token).unwrap();

        assert_eq!(payload["iat"], json!(NOW));
        assert_eq!(payload["exp"], json!(NOW + WEEK_MS));
        assert!(payload.get("meta").is_none());
    }

    #[test]
    fn test_issue_uses_requested_ttl() {
        let signer = signer("dev_secret");
        let token = sign_at(
            &signer,
            &config(),
            NewInvitation {
                ttl_minutes: Some(30.0),
                ..request()
            },
            NOW,
        )
        .unwrap();

        assert_eq!(signer.verify(&token).unwrap()["exp"], json!(NOW + 30 * 60 * 1000));
    }

    #[test]
    fn test_non_positive_ttl_falls_back_to_default() {
        let signer = signer("dev_secret");
        for ttl in [0.0, -5.0, f64::NAN] {
            let token = sign_at(
                &signer,
                &config(),
                NewInvitation {
                    ttl_minutes: Some(ttl),
                    ..request()
                },
                NOW,
            )
            .unwrap();
            assert_eq!(signer.verify(&token).unwrap()["exp"], json!(NOW + WEEK_MS));
        }
    }

    #[test]
    fn test_absolute_expiration_wins_over_ttl() {
        let signer = signer("dev_secret");
        let token = sign_at(
            &signer,
            &config(),
            NewInvitation {
                ttl_minutes: Some(30.0),
                expires_at: Some(NOW + 5_000),
                ..request()
            },
            NOW,
        )
        .unwrap();

        assert_eq!(signer.verify(&token).unwrap()["exp"], json!(NOW + 5_000));
    }

    #[test]
    fn test_past_absolute_expiration_is_rejected() {
        let err = sign_at(
            &signer("dev_secret"),
            &config(),
            NewInvitation {
                expires_at: Some(NOW),
                ..request()
            },
            NOW,
        )
        .unwrap_err();

        assert_eq!(invitation_kind(&err), &InvitationErrorKind::InvalidRequest);
    }

    #[test]
    fn test_missing_identifiers_are_rejected() {
        let cases = [
            NewInvitation {
                contact_id: None,
                ..request()
            },
            NewInvitation {
                event_id: Some(String::new()),
                ..request()
            },
        ];

        for case in cases {
            let err = sign_at(&signer("dev_secret"), &config(), case, NOW).unwrap_err();
            assert_eq!(invitation_kind(&err), &InvitationErrorKind::InvalidRequest);
            assert_eq!(err.message().as_deref(), Some("Missing contactId or eventId"));
        }
    }

    #[test]
    fn test_profile_is_signed_under_meta() {
        let signer = signer("dev_secret");
        let token = sign_at(
            &signer,
            &config(),
            NewInvitation {
                profile: Profile {
                    first_name: Some("Ana".to_string()),
                    last_name: Some("Li".to_string()),
                    email: Some("ana@example.com".to_string()),
                    ..Profile::default()
                },
                ..request()
            },
            NOW,
        )
        .unwrap();

        let payload = signer.verify(&token).unwrap();
        assert_eq!(
            payload["meta"],
            json!({ "firstName": "Ana", "lastName": "Li", "email": "ana@example.com" })
        );
        let keys: Vec<&String> = payload.keys().collect();
        assert_eq!(keys, vec!["contactId", "eventId", "iat", "exp", "meta"]);
    }

    #[test]
    fn test_validate_returns_invitation_view() {
        let signer = signer("dev_secret");
        let token = sign_at(
            &signer,
            &config(),
            NewInvitation {
                profile: Profile {
                    first_name: Some("Ana".to_string()),
                    last_name: Some("Li".to_string()),
                    organization: Some("Acme".to_string()),
                    ..Profile::default()
                },
                ..request()
            },
            NOW,
        )
        .unwrap();

        let invitation = validate_at(&signer, &token, NOW + 1).unwrap();
        assert_eq!(
            invitation,
            Invitation {
                contact_id: Some("c1".to_string()),
                event_id: Some("evt1".to_string()),
                display_name: Some("Ana Li".to_string()),
                email: None,
                organization: Some("Acme".to_string()),
                issued_at: Some(NOW),
                expires_at: NOW + WEEK_MS,
            }
        );
    }

    #[test]
    fn test_full_name_takes_precedence() {
        let signer = signer("dev_secret");
        let mut payload = Payload::new();
        payload.insert("eventId".to_string(), json!("evt1"));
        payload.insert("exp".to_string(), json!(2000));
        payload.insert(
            "meta".to_string(),
            json!({ "fullName": "Ana Li", "firstName": "Ana", "lastName": "Lopez" }),
        );
        let token = signer.sign(&payload).unwrap();

        let invitation = validate_at(&signer, &token, 1000).unwrap();
        assert_eq!(invitation.display_name.as_deref(), Some("Ana Li"));
    }

    #[test]
    fn test_expiration_boundary() {
        let signer = signer("dev_secret");
        let mut payload = Payload::new();
        payload.insert("exp".to_string(), json!(2000));
        let token = signer.sign(&payload).unwrap();

        assert!(validate_at(&signer, &token, 1999).is_ok());
        assert!(validate_at(&signer, &token, 2000).is_ok());
        let err = validate_at(&signer, &token, 2001).unwrap_err();
        assert_eq!(invitation_kind(&err), &InvitationErrorKind::Expired);
    }

    #[test]
    fn test_signed_scenario_expires() {
        let signer = signer("dev_secret");
        let payload = match json!({
            "contactId": "c1",
            "eventId": "evt1",
            "iat": 1000,
            "exp": 2000,
            "meta": { "fullName": "Ana Li" }
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let token = signer.sign(&payload).unwrap();

        assert_eq!(signer.verify(&token).unwrap(), payload);
        let err = validate_at(&signer, &token, 2500).unwrap_err();
        assert_eq!(invitation_kind(&err), &InvitationErrorKind::Expired);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = sign_at(&signer("A"), &config(), request(), NOW).unwrap();
        let err = validate_at(&signer("B"), &token, NOW).unwrap_err();

        assert_eq!(invitation_kind(&err), &InvitationErrorKind::InvalidSignature);
        assert!(err.is_invalid_invitation());
    }

    #[test]
    fn test_missing_or_non_numeric_exp_is_invalid_payload() {
        let signer = signer("dev_secret");
        let mut payload = Payload::new();
        payload.insert("exp".to_string(), json!("tomorrow"));
        let token = signer.sign(&payload).unwrap();

        let err = validate_at(&signer, &token, NOW).unwrap_err();
        assert_eq!(invitation_kind(&err), &InvitationErrorKind::InvalidPayload);
    }

    #[test]
    fn test_fractional_exp_rounds_down() {
        let signer = signer("dev_secret");
        let mut payload = Payload::new();
        payload.insert("exp".to_string(), json!(-0.5));
        let token = signer.sign(&payload).unwrap();

        let err = validate_at(&signer, &token, 0).unwrap_err();
        assert_eq!(invitation_kind(&err), &InvitationErrorKind::Expired);

        let mut payload = Payload::new();
        payload.insert("exp".to_string(), json!(2000.5));
        let token = signer.sign(&payload).unwrap();
        assert_eq!(validate_at(&signer, &token, 2000).unwrap().expires_at, 2000);
    }

    #[test]
    fn test_empty_token_is_malformed() {
        let err = validate_at(&signer("dev_secret"), "", NOW).unwrap_err();
        assert_eq!(invitation_kind(&err), &InvitationErrorKind::MalformedToken);
    }
}
