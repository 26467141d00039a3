//! Domain error to HTTP response mapping

use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use themis_domain::error::Error;
use tracing::error;

use crate::constants::INTERNAL_ERROR_MESSAGE;
use crate::models::ErrorBody;

/// Error returned by route handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Response status
    pub status: Status,
    /// Value of the `error` field
    pub message: String,
}

impl ApiError {
    /// 400 with `message`
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: Status::BadRequest,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::ClientInput { message } => Self::bad_request(message),
            Error::NotFound { resource } => Self {
                status: Status::NotFound,
                message: resource,
            },
            other => {
                error!(error = %other, "Request failed");
                Self {
                    status: Status::InternalServerError,
                    message: INTERNAL_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status, Json(ErrorBody::new(self.message))).respond_to(request)
    }
}
