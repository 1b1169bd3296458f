//! Accessors for the API key injected by the itch.io launcher.
//!
//! This module provides the [`Credentials`] struct reading the key from an
//! [`EnvProvider`], and free functions doing the same against the process
//! environment.

use log::debug;

use crate::error::Error;
use crate::launcher::env::{EnvProvider, ProcessEnv};
use crate::launcher::{API_KEY_EXPIRES_AT_VAR, API_KEY_VAR};

/// Reads the itch.io credentials from an environment.
///
/// Values are read on every call and never cached, so a launcher restarting
/// the game with a fresh key is picked up immediately.
///
/// # Examples
///
/// ```no_run
/// use itchio_launcher::launcher::{Credentials, ProcessEnv};
///
/// let credentials = Credentials::new(ProcessEnv);
/// match credentials.get_api_key() {
///     Ok(_) => println!("launched from itch.io"),
///     Err(e) => println!("{}", e),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Credentials<E: EnvProvider> {
    /// Environment the variables are read from
    env: E,
}

impl<E: EnvProvider> Credentials<E> {
    /// Create a new [Credentials].
    ///
    /// # Arguments
    ///
    /// * `env` - The environment the launcher variables are read from.
    pub fn new(env: E) -> Self {
        Credentials { env }
    }

    /// Returns the JWT API key provided by the itch.io launcher.
    ///
    /// # Errors
    ///
    /// [`Error::MissingConfiguration`] when `ITCHIO_API_KEY` is not set.
    pub fn get_api_key(&self) -> Result<String, Error> {
        self.require(API_KEY_VAR)
    }

    /// Returns the expiration date of the API key, as provided by the launcher.
    ///
    /// The value is returned verbatim, it is not parsed into a date.
    ///
    /// # Errors
    ///
    /// [`Error::MissingConfiguration`] when `ITCHIO_API_KEY_EXPIRES_AT` is not set.
    pub fn get_api_key_expiration(&self) -> Result<String, Error> {
        self.require(API_KEY_EXPIRES_AT_VAR)
    }

    /// Tells whether the application was launched from the itch.io launcher.
    ///
    /// The launcher is considered present when the API key is set.
    pub fn verify_launched(&self) -> bool {
        match self.get_api_key() {
            Ok(_) => true,
            Err(e) => {
                debug!("not launched from itch.io: {}", e);
                false
            }
        }
    }

    fn require(&self, variable: &str) -> Result<String, Error> {
        let Some(value) = self.env.var(variable) else {
            debug!("{} environment variable is not set", variable);
            return Err(Error::MissingConfiguration(variable.to_owned()));
        };

        Ok(value)
    }
}

/// Returns the API key from the process environment.
///
/// See [`Credentials::get_api_key`].
pub fn get_api_key() -> Result<String, Error> {
    Credentials::new(ProcessEnv).get_api_key()
}

/// Returns the API key expiration from the process environment.
///
/// See [`Credentials::get_api_key_expiration`].
pub fn get_api_key_expiration() -> Result<String, Error> {
    Credentials::new(ProcessEnv).get_api_key_expiration()
}

/// Tells whether the current process was started by the itch.io launcher.
///
/// See [`Credentials::verify_launched`].
pub fn verify_launched() -> bool {
    Credentials::new(ProcessEnv).verify_launched()
}
