use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::models::appointment::FieldError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("appointment not found: {0}")]
    NotFound(String),

    #[error("appointment already exists: {0}")]
    AlreadyExists(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match *e.kind {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                StoreError::Unavailable(e.to_string())
            }
            ErrorKind::Write(mongodb::error::WriteFailure::WriteError(ref w)) if w.code == 11000 => {
                StoreError::AlreadyExists(w.message.clone())
            }
            _ => StoreError::Backend(e.to_string()),
        }
    }
}

/// Failure talking to the geocoder or drive-time provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request")]
    Validation(Vec<FieldError>),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("no location found for address: {0}")]
    NoMatch(String),

    #[error("rate limit exceeded for {0}")]
    RateLimited(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: String,
    user_message: &'static str,
    #[serde(skip_serializing_if = "no_fields")]
    fields: &'a [FieldError],
}

fn no_fields(fields: &&[FieldError]) -> bool {
    fields.is_empty()
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "invalid-argument",
            ApiError::BadRequest(_) => "invalid-argument",
            ApiError::NoMatch(_) => "not-found",
            ApiError::RateLimited(_) => "resource-exhausted",
            ApiError::Store(StoreError::NotFound(_)) => "not-found",
            ApiError::Store(StoreError::AlreadyExists(_)) => "already-exists",
            ApiError::Store(StoreError::Unavailable(_)) => "unavailable",
            ApiError::Store(StoreError::Backend(_)) => "unknown",
            ApiError::Provider(_) => "unavailable",
        }
    }

    /// Copy shown to the rep; never contains backend details.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => {
                "Please check the highlighted fields and try again."
            }
            ApiError::NoMatch(_) => "We couldn't find that address. Please check it and try again.",
            ApiError::RateLimited(_) => "Too many requests. Please wait a moment and try again.",
            ApiError::Store(StoreError::NotFound(_)) => "The appointment could not be found.",
            ApiError::Store(StoreError::AlreadyExists(_)) => "This appointment already exists.",
            ApiError::Store(StoreError::Unavailable(_)) | ApiError::Provider(_) => {
                "The service is temporarily unavailable. Please try again later."
            }
            ApiError::Store(StoreError::Backend(_)) => "Something went wrong. Please try again.",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NoMatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::AlreadyExists(_)) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::Unavailable(_)) | ApiError::Provider(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        } else {
            tracing::warn!(code = self.code(), "{}", self);
        }

        let fields: &[FieldError] = match self {
            ApiError::Validation(fields) => fields.as_slice(),
            _ => &[],
        };

        HttpResponse::build(status).json(ErrorBody {
            code: self.code(),
            message: self.to_string(),
            user_message: self.user_message(),
            fields,
        })
    }
}
