//! Error types for the `domain` layer.
use invite_token::{Error as TokenError, ErrorKind as TokenErrorKind};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. `web` depends on `domain` and never directly on `invite-token`
/// errors; the `error_kind`s are used by `web` to pick status codes and messages.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Invitation(InvitationErrorKind),
    Qr(QrErrorKind),
    Internal(InternalErrorKind),
}

/// Errors while issuing or validating an invitation.
#[derive(Debug, PartialEq)]
pub enum InvitationErrorKind {
    /// The caller supplied an incomplete or inconsistent invitation request.
    InvalidRequest,
    MalformedToken,
    InvalidSignature,
    InvalidPayload,
    /// The token authenticates but its `exp` instant has passed.
    Expired,
}

/// Errors while producing a QR image.
#[derive(Debug, PartialEq)]
pub enum QrErrorKind {
    EmptyInput,
    DataTooLong,
    Encoding,
}

#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Other(String),
}

impl Error {
    /// Returns the message carried by the source error, if any.
    pub fn message(&self) -> Option<String> {
        self.source.as_ref().map(|source| source.to_string())
    }

    /// True for every way an invitation token can fail to be honored.
    pub fn is_invalid_invitation(&self) -> bool {
        matches!(
            self.error_kind,
            DomainErrorKind::Invitation(
                InvitationErrorKind::MalformedToken
                    | InvitationErrorKind::InvalidSignature
                    | InvitationErrorKind::InvalidPayload
                    | InvitationErrorKind::Expired
            )
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `invite-token` layer to the `domain` layer.
impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        let error_kind = match err.error_kind {
            TokenErrorKind::MalformedToken => {
                DomainErrorKind::Invitation(InvitationErrorKind::MalformedToken)
            }
            TokenErrorKind::InvalidSignature => {
                DomainErrorKind::Invitation(InvitationErrorKind::InvalidSignature)
            }
            TokenErrorKind::InvalidPayload => {
                DomainErrorKind::Invitation(InvitationErrorKind::InvalidPayload)
            }
            TokenErrorKind::InvalidKey => DomainErrorKind::Internal(InternalErrorKind::Config),
            TokenErrorKind::Serialization => DomainErrorKind::Internal(InternalErrorKind::Other(
                "Token serialization failed".to_string(),
            )),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(err: qrcode::types::QrError) -> Self {
        let error_kind = match err {
            qrcode::types::QrError::DataTooLong => QrErrorKind::DataTooLong,
            _ => QrErrorKind::Encoding,
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Qr(error_kind),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Qr(QrErrorKind::Encoding),
        }
    }
}

/// Helper function to create invitation errors.
pub fn invitation_error(kind: InvitationErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: DomainErrorKind::Invitation(kind),
    }
}

/// Helper function to create QR errors.
pub fn qr_error(kind: QrErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: DomainErrorKind::Qr(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invite_token::error::token_error;

    #[test]
    fn test_token_errors_map_to_invitation_kinds() {
        let cases = [
            (
                TokenErrorKind::MalformedToken,
                DomainErrorKind::Invitation(InvitationErrorKind::MalformedToken),
            ),
            (
                TokenErrorKind::InvalidSignature,
                DomainErrorKind::Invitation(InvitationErrorKind::InvalidSignature),
            ),
            (
                TokenErrorKind::InvalidPayload,
                DomainErrorKind::Invitation(InvitationErrorKind::InvalidPayload),
            ),
            (
                TokenErrorKind::InvalidKey,
                DomainErrorKind::Internal(InternalErrorKind::Config),
            ),
        ];

        for (token_kind, domain_kind) in cases {
            let err: Error = token_error(token_kind, "test").into();
            assert_eq!(err.error_kind, domain_kind);
        }
    }

    #[test]
    fn test_every_token_failure_is_an_invalid_invitation() {
        for kind in [
            TokenErrorKind::MalformedToken,
            TokenErrorKind::InvalidSignature,
            TokenErrorKind::InvalidPayload,
        ] {
            let err: Error = token_error(kind, "test").into();
            assert!(err.is_invalid_invitation());
        }

        let expired = invitation_error(InvitationErrorKind::Expired, "expired");
        assert!(expired.is_invalid_invitation());

        let bad_request = invitation_error(InvitationErrorKind::InvalidRequest, "missing");
        assert!(!bad_request.is_invalid_invitation());
    }

    #[test]
    fn test_message_comes_from_source() {
        let err = invitation_error(
            InvitationErrorKind::InvalidRequest,
            "Missing contactId or eventId",
        );
        assert_eq!(err.message().as_deref(), Some("Missing contactId or eventId"));
    }
}
