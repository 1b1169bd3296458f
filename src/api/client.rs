//! HTTP client used to reach the itch.io API.
//!
//! This module provides the [`HttpClient`] capability the dispatcher forwards
//! requests to, and [`ReqwestClient`], its implementation on top of `reqwest`.

use std::collections::HashMap;

use log::debug;
use mockall::automock;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Request headers, header name to value.
pub type Headers = HashMap<String, String>;

/// Outcome of a JSON request: the decoded body or the transport error.
pub type HttpResult = Result<Value, reqwest::Error>;

/// Callback receiving the outcome of a request.
pub type ResponseHandler = Box<dyn FnOnce(HttpResult) + Send>;

/// Capability to perform JSON requests.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
/// Implementations hand every outcome to the handler, errors included.
#[automock]
pub trait HttpClient {
    /// Performs a GET request and passes the JSON response to `handler`.
    async fn json_get(&self, url: &str, headers: Headers, handler: ResponseHandler);
    /// Performs a POST request and passes the JSON response to `handler`.
    async fn json_post(&self, url: &str, headers: Headers, handler: ResponseHandler);
}

/// [HttpClient] backed by a [reqwest::Client].
///
/// # Examples
///
/// ```no_run
/// use std::collections::HashMap;
/// use itchio_launcher::api::{HttpClient, ReqwestClient};
///
/// # #[tokio::main]
/// # async fn main() {
/// let client = ReqwestClient::new();
/// client
///     .json_get(
///         "https://itch.io/api/1/jwt/me",
///         HashMap::new(),
///         Box::new(|response| println!("{:?}", response)),
///     )
///     .await;
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    /// HTTP client
    client: Client,
}

impl ReqwestClient {
    /// Create a new [ReqwestClient].
    pub fn new() -> Self {
        ReqwestClient {
            client: Client::new(),
        }
    }

    /// Sends the request and decodes its body as JSON.
    ///
    /// The status code is not inspected: error payloads returned by the API
    /// reach the handler like any other body.
    async fn send(&self, request: RequestBuilder, headers: Headers) -> HttpResult {
        let request = headers
            .iter()
            .fold(request, |request, (name, value)| request.header(name, value));

        let response = request.send().await?;
        debug!("response status {}", response.status());

        response.json().await
    }
}

impl HttpClient for ReqwestClient {
    async fn json_get(&self, url: &str, headers: Headers, handler: ResponseHandler) {
        debug!("request GET {}", url);
        let result = self.send(self.client.get(url), headers).await;
        handler(result);
    }

    async fn json_post(&self, url: &str, headers: Headers, handler: ResponseHandler) {
        debug!("request POST {}", url);
        let result = self.send(self.client.post(url), headers).await;
        handler(result);
    }
}
