//! itch.io JWT API integration.
//!
//! This module issues the predefined itch.io API requests authenticated with
//! the key injected by the launcher.
//!
//! # Modules
//!
//! - `client` - HTTP client capability and its reqwest implementation
//! - `endpoints` - URL templates of the itch.io JWT API
//! - `requester` - Request dispatch with the bearer token
//!
//! # Examples
//!
//! ```no_run
//! use itchio_launcher::api::{ItchRequester, ReqwestClient};
//! use itchio_launcher::launcher::ProcessEnv;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), itchio_launcher::Error> {
//! let requester = ItchRequester::new(ReqwestClient::new(), ProcessEnv);
//! requester
//!     .get_account_info(Box::new(|response| println!("{:?}", response)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod endpoints;
mod requester;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub use crate::api::client::{Headers, HttpClient, HttpResult, ReqwestClient, ResponseHandler};
#[cfg(test)]
pub use crate::api::client::MockHttpClient;
pub use crate::api::endpoints::{DEFAULT_API_URL, DownloadKeyLookup, Endpoint, PurchaseLookup};
pub use crate::api::requester::ItchRequester;

/// HTTP verbs accepted by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl FromStr for Method {
    type Err = Error;

    /// Parses `GET` or `POST`. Matching is exact, like the verbs on the wire.
    fn from_str(method: &str) -> Result<Self, Self::Err> {
        match method {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => Err(Error::UnsupportedMethod(method.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}
