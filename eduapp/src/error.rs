use educore::error::{AuthError, FetchError};
use http::status::StatusCode;
use serde::{Deserialize, Serialize};
use std::{
    convert::Infallible,
    str::FromStr,
};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    #[error("400 Bad Request")]
    BadRequest,
    #[error("401 Unauthorized")]
    Unauthorized,
    #[error("403 Forbidden")]
    Forbidden,
    #[error("404 Not Found")]
    NotFound,
    #[error("500 Internal Server Error")]
    InternalServerError,

    // other non-http error
    #[error("Network Error")]
    NetworkError,
    #[error("Encode/decode error")]
    SerdeError,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StatusCode> for AppError {
    // Only convert into status known to AppError
    fn from(value: StatusCode) -> Self {
        match value {
            StatusCode::BAD_REQUEST => AppError::BadRequest,
            StatusCode::UNAUTHORIZED => AppError::Unauthorized,
            StatusCode::NOT_FOUND => AppError::NotFound,
            StatusCode::FORBIDDEN => AppError::Forbidden,
            _ => AppError::InternalServerError,
        }
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Network(_) => AppError::NetworkError,
            FetchError::Decode(_) => AppError::SerdeError,
            FetchError::Server { status } => StatusCode::from_u16(status)
                .map(AppError::from)
                .unwrap_or(AppError::InternalServerError),
            _ => AppError::InternalServerError,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(_: AuthError) -> Self {
        AppError::Unauthorized
    }
}

impl FromStr for AppError {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // This is converting the output of the Display impl by thiserror
        Ok(match s {
            "400 Bad Request" => AppError::BadRequest,
            "401 Unauthorized" => AppError::Unauthorized,
            "403 Forbidden" => AppError::Forbidden,
            "404 Not Found" => AppError::NotFound,
            "Network Error" => AppError::NetworkError,
            "Encode/decode error" => AppError::SerdeError,
            // anything else is considered an InternalServerError
            _ => AppError::InternalServerError,
        })
    }
}
