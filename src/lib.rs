//! itchio-launcher - itch.io launcher credentials and JWT API requests.
//!
//! When a game is started from the itch.io app, the launcher injects an API key
//! into the game's environment. This crate reads it back, tells whether the
//! game was launched that way, and performs the itch.io JWT API requests
//! authenticated with that key.
//!
//! # Architecture
//!
//! - [`launcher`] - Credential accessors and the launch check
//! - [`api`] - Request dispatch, endpoint templates and the HTTP client capability
//! - [`config`] - Configuration of the command-line tool
//! - [`error`] - Errors raised before a request reaches the network
//!
//! # Environment Variables
//!
//! - `ITCHIO_API_KEY` - JWT API key injected by the launcher
//! - `ITCHIO_API_KEY_EXPIRES_AT` - Expiration date of the API key
//!
//! # Examples
//!
//! ```no_run
//! use itchio_launcher::api::{ItchRequester, ReqwestClient};
//! use itchio_launcher::launcher::{self, ProcessEnv};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), itchio_launcher::Error> {
//! if !launcher::verify_launched() {
//!     println!("please start the game from the itch.io app");
//!     return Ok(());
//! }
//!
//! let requester = ItchRequester::new(ReqwestClient::new(), ProcessEnv);
//! requester
//!     .get_account_info(Box::new(|profile| println!("{:?}", profile)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod launcher;

pub use crate::error::Error;
