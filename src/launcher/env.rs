//! Access to the environment variables injected by the itch.io launcher.

use log::warn;
use mockall::automock;

/// Source of environment variables.
///
/// This trait abstracts the process environment so credentials can be
/// substituted in tests without touching the real environment.
#[automock]
pub trait EnvProvider {
    /// Returns the value of `name`, or `None` when it is not set.
    ///
    /// A set variable always yields `Some`, even when its value is empty.
    fn var(&self, name: &str) -> Option<String>;
}

/// [EnvProvider] backed by the environment of the current process.
///
/// A value that is not valid unicode is still reported as set. Invalid
/// sequences are replaced with `U+FFFD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = std::env::var_os(name)?;

        Some(value.into_string().unwrap_or_else(|raw| {
            warn!("{} environment variable is not valid unicode", name);
            raw.to_string_lossy().into_owned()
        }))
    }
}
