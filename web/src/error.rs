use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::error::{
    DomainErrorKind, Error as DomainError, InternalErrorKind, InvitationErrorKind, QrErrorKind,
};
use log::*;

use crate::response::ErrorResponse;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match &self.0.error_kind {
            DomainErrorKind::Invitation(_) => StatusCode::BAD_REQUEST,
            DomainErrorKind::Qr(QrErrorKind::EmptyInput | QrErrorKind::DataTooLong) => {
                StatusCode::BAD_REQUEST
            }
            DomainErrorKind::Qr(QrErrorKind::Encoding) => StatusCode::INTERNAL_SERVER_ERROR,
            DomainErrorKind::Internal(InternalErrorKind::Config)
            | DomainErrorKind::Internal(InternalErrorKind::Other(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message shown to API clients. Server-side failures are not detailed.
    fn client_message(&self) -> String {
        match &self.0.error_kind {
            DomainErrorKind::Invitation(InvitationErrorKind::InvalidRequest)
            | DomainErrorKind::Qr(QrErrorKind::EmptyInput | QrErrorKind::DataTooLong) => self
                .0
                .message()
                .unwrap_or_else(|| "Bad request".to_string()),
            DomainErrorKind::Invitation(_) => "Invitation not valid".to_string(),
            _ => "Unexpected error".to_string(),
        }
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            debug!("Request rejected: {}", self.0);
        }

        (status, Json(ErrorResponse::new(self.client_message()))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
