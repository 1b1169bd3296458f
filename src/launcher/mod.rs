//! Credentials handed over by the itch.io launcher.
//!
//! When a game is started from the itch.io app, the launcher injects a JWT API
//! key and its expiration date into the environment of the game process. This
//! module reads them back and tells whether the game was launched that way.
//!
//! # Modules
//!
//! - `credentials` - Accessors for the API key and its expiration, and the launch check
//! - `env` - Abstraction over the process environment
//!
//! # Examples
//!
//! ```no_run
//! use itchio_launcher::launcher;
//!
//! if launcher::verify_launched() {
//!     println!(
//!         "launched from itch.io, key expires at {:?}",
//!         launcher::get_api_key_expiration()
//!     );
//! }
//! ```

mod credentials;
mod env;

pub use crate::launcher::credentials::{
    Credentials, get_api_key, get_api_key_expiration, verify_launched,
};
#[cfg(test)]
pub use crate::launcher::env::MockEnvProvider;
pub use crate::launcher::env::{EnvProvider, ProcessEnv};

/// Environment variable holding the JWT API key.
pub const API_KEY_VAR: &str = "ITCHIO_API_KEY";
/// Environment variable holding the expiration date of the API key.
pub const API_KEY_EXPIRES_AT_VAR: &str = "ITCHIO_API_KEY_EXPIRES_AT";
