use std::fmt::Display;

use crate::auth::AuthError;

/// Internal failure kinds for one detection request.
///
/// These stay distinct for logging and tests; the web boundary collapses
/// them into a single public error message.
#[derive(Debug)]
pub enum DetectError {
    Unauthorized(AuthError),
    MalformedBody,
    MissingField(&'static str),
    UnsupportedLanguage(String),
    UnsupportedFormat(String),
    InvalidAudio(String),
    MethodNotAllowed,
}

impl Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectError::Unauthorized(e) => write!(f, "unauthorized: {}", e),
            DetectError::MalformedBody => write!(f, "malformed request body"),
            DetectError::MissingField(field) => write!(f, "missing field: {}", field),
            DetectError::UnsupportedLanguage(l) => write!(f, "unsupported language: {}", l),
            DetectError::UnsupportedFormat(fmt) => write!(f, "unsupported audio format: {}", fmt),
            DetectError::InvalidAudio(e) => write!(f, "invalid audio payload: {}", e),
            DetectError::MethodNotAllowed => write!(f, "method not allowed"),
        }
    }
}

impl From<AuthError> for DetectError {
    fn from(error: AuthError) -> Self {
        DetectError::Unauthorized(error)
    }
}
