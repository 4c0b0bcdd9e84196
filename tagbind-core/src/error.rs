// Error types for tagbind

use crate::HttpStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Unsupported Media Type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    /// Status a handler should answer with for this error.
    pub fn status(&self) -> HttpStatus {
        match self {
            Error::Deserialization(_) => HttpStatus::BadRequest,
            Error::UnsupportedMediaType(_) => HttpStatus::UnsupportedMediaType,
            Error::PayloadTooLarge(_) => HttpStatus::PayloadTooLarge,
            Error::Validation(_) => HttpStatus::UnprocessableEntity,
            Error::Serialization(_) | Error::Internal(_) => HttpStatus::InternalServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status().code()
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::Validation("x".into()).status(),
            HttpStatus::UnprocessableEntity
        );
        assert_eq!(Error::Deserialization("x".into()).status_code(), 400);
        assert_eq!(Error::Internal("x".into()).status_code(), 500);
        assert!(Error::UnsupportedMediaType("text/plain".into()).is_client_error());
    }

    #[test]
    fn test_from_serde_json() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Deserialization(_)));
        assert!(err.to_string().starts_with("Deserialization error"));
    }
}
