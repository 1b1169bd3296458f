//! Errors raised by the credential accessors and the request dispatcher.

use std::fmt;

/// Errors returned before any request reaches the network.
///
/// Failures of the HTTP layer are never wrapped here: they are handed to the
/// response handler untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An environment variable expected from the itch.io launcher is not set.
    ///
    /// # Fields
    ///
    /// * `String` - Name of the missing variable
    MissingConfiguration(String),
    /// The caller asked for a verb other than `GET` or `POST`.
    ///
    /// # Fields
    ///
    /// * `String` - The rejected verb, as given
    UnsupportedMethod(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingConfiguration(variable) => {
                write!(f, "{} environment variable is not set", variable)
            }
            Error::UnsupportedMethod(method) => write!(f, "invalid HTTP method: {}", method),
        }
    }
}

impl std::error::Error for Error {}
