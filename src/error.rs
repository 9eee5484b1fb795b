mod error_kind;

use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError, http::StatusCode};
use anyhow::anyhow;
use serde_json::json;
use std::fmt::{Debug, Display, Formatter};

pub use error_kind::ErrorKind;

/// Credvault native error type.
#[derive(thiserror::Error)]
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
}

impl Error {
    /// Creates a Client error instance with the given message.
    pub fn client<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::ClientError,
        }
    }

    /// Creates a Not Found error instance.
    pub fn not_found() -> Self {
        Self {
            root_cause: anyhow!("Not Found"),
            kind: ErrorKind::NotFound,
        }
    }

    /// Creates an Unauthorized error instance.
    pub fn unauthorized() -> Self {
        Self {
            root_cause: anyhow!("Unauthorized"),
            kind: ErrorKind::Unauthorized,
        }
    }

    /// Creates a Decryption error instance with the given root cause.
    pub fn decryption(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::DecryptionError,
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::ClientError => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::DecryptionError | ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).json(json!({
            "message": match self.kind() {
                ErrorKind::ClientError | ErrorKind::NotFound | ErrorKind::Unauthorized => {
                    self.root_cause.to_string()
                }
                ErrorKind::DecryptionError | ErrorKind::Unknown => {
                    "Internal Server Error".to_string()
                }
            }
        }))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap_or_else(|root_cause| Error {
            root_cause,
            kind: ErrorKind::Unknown,
        })
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Error {
        Error {
            root_cause: anyhow!(err),
            kind: ErrorKind::Unknown,
        }
    }
}
