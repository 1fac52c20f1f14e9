use std::error::Error;
use std::fmt;

use crate::store::StoreError;

/// Error type for catalog lookups.
#[derive(Debug)]
pub enum ApiError {
    /// One or more required query parameters were absent or blank.
    MissingParameters(Vec<&'static str>),
    /// The query string could not be read (e.g. a parameter given twice).
    InvalidQuery(String),
    /// A fully specified lookup matched nothing.
    NotFound(String),
    /// The backing store failed.
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingParameters(names) if names.len() == 1 => {
                write!(f, "{} parameter is required", names[0])
            }
            ApiError::MissingParameters(names) => {
                write!(f, "{} parameters are required", names.join(", "))
            }
            ApiError::InvalidQuery(msg) => write!(f, "invalid query string: {}", msg),
            ApiError::NotFound(what) => write!(f, "not found: {}", what),
            ApiError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingParameters(_) => 400,
            ApiError::InvalidQuery(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Store(_) => 500,
        }
    }

    /// Message safe to hand back to a client.
    ///
    /// Store failures are reported generically; their detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
