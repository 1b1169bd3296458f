//! Authenticated requests to the itch.io JWT API.
//!
//! This module provides the [`ItchRequester`] struct forwarding requests to an
//! [`HttpClient`] with the launcher's API key as bearer token.

use log::{debug, info};
use reqwest::Url;

use crate::api::Method;
use crate::api::client::{Headers, HttpClient, ResponseHandler};
use crate::api::endpoints::{DEFAULT_API_URL, DownloadKeyLookup, Endpoint, PurchaseLookup};
use crate::error::Error;
use crate::launcher::{Credentials, EnvProvider};

/// Dispatches requests to the itch.io API on behalf of the launched game.
///
/// The API key is read from the environment on every request. Responses are
/// not parsed: the handler receives whatever the [HttpClient] produced.
///
/// # Examples
///
/// ```no_run
/// use itchio_launcher::api::{ItchRequester, ReqwestClient};
/// use itchio_launcher::launcher::ProcessEnv;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), itchio_launcher::Error> {
/// let requester = ItchRequester::new(ReqwestClient::new(), ProcessEnv);
/// requester
///     .get_account_games(Box::new(|games| println!("{:?}", games)))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ItchRequester<C: HttpClient, E: EnvProvider> {
    /// HTTP client performing the requests
    client: C,
    /// Source of the API key
    credentials: Credentials<E>,
    /// Base url of the itch.io JWT API
    base_url: Url,
}

impl<C: HttpClient, E: EnvProvider> ItchRequester<C, E> {
    /// Create a new [ItchRequester] targeting the public itch.io API.
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client performing the requests.
    /// * `env` - The environment holding the launcher credentials.
    pub fn new(client: C, env: E) -> Self {
        let base_url = Url::parse(DEFAULT_API_URL).expect("default itch.io API url is valid");
        Self::with_base_url(client, env, base_url)
    }

    /// Create a new [ItchRequester] targeting another API server.
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client performing the requests.
    /// * `env` - The environment holding the launcher credentials.
    /// * `base_url` - Base url the endpoint paths are appended to.
    pub fn with_base_url(client: C, env: E, base_url: Url) -> Self {
        ItchRequester {
            client,
            credentials: Credentials::new(env),
            base_url,
        }
    }

    /// Base url the endpoint paths are appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Performs an API request authenticated with the launcher's API key.
    ///
    /// The API key is resolved first, then the method is checked. Both happen
    /// before the client is called, so neither error reaches the network.
    ///
    /// # Arguments
    ///
    /// * `url` - Full url of the request.
    /// * `method` - `GET` or `POST`.
    /// * `handler` - Callback receiving the JSON response or the HTTP error.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingConfiguration`] when the API key is not set
    /// - [`Error::UnsupportedMethod`] when `method` is neither `GET` nor `POST`
    pub async fn dispatch(
        &self,
        url: &str,
        method: &str,
        handler: ResponseHandler,
    ) -> Result<(), Error> {
        let api_key = self.credentials.get_api_key()?;
        let method: Method = method.parse()?;

        self.send(url, method, &api_key, handler).await;
        Ok(())
    }

    /// Performs an authenticated request with the default method, `GET`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingConfiguration`] when the API key is not set.
    pub async fn dispatch_get(&self, url: &str, handler: ResponseHandler) -> Result<(), Error> {
        let api_key = self.credentials.get_api_key()?;

        self.send(url, Method::default(), &api_key, handler).await;
        Ok(())
    }

    /// Request `credentials/info`: scopes of the API key and its expiration date.
    pub async fn get_credential_info(&self, handler: ResponseHandler) -> Result<(), Error> {
        self.dispatch_get(Endpoint::CredentialsInfo.url(&self.base_url).as_str(), handler)
            .await
    }

    /// Request `me`: public profile of the authenticated user.
    pub async fn get_account_info(&self, handler: ResponseHandler) -> Result<(), Error> {
        self.dispatch_get(Endpoint::Me.url(&self.base_url).as_str(), handler)
            .await
    }

    /// Request `my-games`: games the user uploaded or collaborates on.
    pub async fn get_account_games(&self, handler: ResponseHandler) -> Result<(), Error> {
        self.dispatch_get(Endpoint::MyGames.url(&self.base_url).as_str(), handler)
            .await
    }

    /// Request `game/{game_id}/download_keys` to check whether a download key
    /// exists for the game.
    ///
    /// # Arguments
    ///
    /// * `game_id` - Identifier of the game, as returned by `my-games`.
    /// * `lookup` - Download key, user id or e-mail to look up.
    /// * `handler` - Callback receiving the JSON response or the HTTP error.
    pub async fn get_game_download_keys(
        &self,
        game_id: &str,
        lookup: &DownloadKeyLookup,
        handler: ResponseHandler,
    ) -> Result<(), Error> {
        let mut url = Endpoint::GameDownloadKeys(game_id).url(&self.base_url);
        lookup.append_to(&mut url);
        self.dispatch_get(url.as_str(), handler).await
    }

    /// Request `game/{game_id}/purchases` to list the completed purchases of a
    /// buyer for the game.
    ///
    /// # Arguments
    ///
    /// * `game_id` - Identifier of the game, as returned by `my-games`.
    /// * `lookup` - User id or e-mail of the buyer.
    /// * `handler` - Callback receiving the JSON response or the HTTP error.
    pub async fn get_game_purchases(
        &self,
        game_id: &str,
        lookup: &PurchaseLookup,
        handler: ResponseHandler,
    ) -> Result<(), Error> {
        let mut url = Endpoint::GamePurchases(game_id).url(&self.base_url);
        lookup.append_to(&mut url);
        self.dispatch_get(url.as_str(), handler).await
    }

    async fn send(&self, url: &str, method: Method, api_key: &str, handler: ResponseHandler) {
        let mut headers = Headers::new();
        headers.insert("Authorization".to_owned(), format!("Bearer {}", api_key));

        info!("request {} {}", method, url);
        match method {
            Method::Get => self.client.json_get(url, headers, handler).await,
            Method::Post => self.client.json_post(url, headers, handler).await,
        }
        debug!("request {} {} done", method, url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ReqwestClient;
    use crate::api::client::{HttpResult, MockHttpClient};
    use crate::launcher::{API_KEY_VAR, MockEnvProvider};
    use mockall::predicate::eq;
    use serde_json::json;
    use std::sync::mpsc;

    fn env_with_key(key: Option<&'static str>) -> MockEnvProvider {
        let mut env = MockEnvProvider::new();
        env.expect_var()
            .with(eq(API_KEY_VAR))
            .returning(move |_| key.map(str::to_owned));
        env
    }

    fn capture() -> (ResponseHandler, mpsc::Receiver<HttpResult>) {
        let (sender, receiver) = mpsc::channel();
        let handler: ResponseHandler = Box::new(move |result| {
            sender.send(result).unwrap();
        });
        (handler, receiver)
    }

    fn expect_get(client: &mut MockHttpClient, expected_url: &'static str) {
        client
            .expect_json_get()
            .withf(move |url, headers, _| {
                url == expected_url
                    && headers.len() == 1
                    && headers.get("Authorization").map(String::as_str) == Some("Bearer abc123")
            })
            .times(1)
            .returning(|url, _, handler| handler(Ok(json!({ "url": url }))));
    }

    #[tokio::test]
    async fn test_dispatch_get_sets_bearer_header() {
        let mut client = MockHttpClient::new();
        expect_get(&mut client, "https://itch.io/api/1/jwt/me");
        client.expect_json_post().never();

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();

        requester
            .dispatch("https://itch.io/api/1/jwt/me", "GET", handler)
            .await
            .unwrap();

        let response = receiver.recv().unwrap().unwrap();
        assert_eq!(response["url"], "https://itch.io/api/1/jwt/me");
    }

    #[tokio::test]
    async fn test_dispatch_post() {
        let mut client = MockHttpClient::new();
        client.expect_json_get().never();
        client
            .expect_json_post()
            .withf(|url, headers, _| {
                url == "https://itch.io/api/1/jwt/credentials/info"
                    && headers.get("Authorization").map(String::as_str) == Some("Bearer abc123")
            })
            .times(1)
            .returning(|_, _, handler| handler(Ok(json!({ "scopes": [] }))));

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();

        requester
            .dispatch(
                "https://itch.io/api/1/jwt/credentials/info",
                "POST",
                handler,
            )
            .await
            .unwrap();

        assert!(receiver.recv().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_unsupported_method() {
        let mut client = MockHttpClient::new();
        client.expect_json_get().never();
        client.expect_json_post().never();

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();

        let result = requester
            .dispatch("https://itch.io/api/1/jwt/me", "PUT", handler)
            .await;

        assert_eq!(result, Err(Error::UnsupportedMethod("PUT".to_owned())));
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dispatch_missing_key_wins_over_unsupported_method() {
        let mut client = MockHttpClient::new();
        client.expect_json_get().never();
        client.expect_json_post().never();

        let requester = ItchRequester::new(client, env_with_key(None));
        let (handler, _receiver) = capture();

        let result = requester
            .dispatch("https://itch.io/api/1/jwt/me", "PUT", handler)
            .await;

        assert_eq!(
            result,
            Err(Error::MissingConfiguration("ITCHIO_API_KEY".to_owned()))
        );
    }

    #[tokio::test]
    async fn test_dispatch_get_uses_default_method() {
        let mut client = MockHttpClient::new();
        expect_get(&mut client, "https://itch.io/api/1/jwt/me");
        client.expect_json_post().never();

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();

        requester
            .dispatch_get("https://itch.io/api/1/jwt/me", handler)
            .await
            .unwrap();

        assert!(receiver.recv().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_game_id_stays_in_game_namespace() {
        let mut client = MockHttpClient::new();
        expect_get(
            &mut client,
            "https://itch.io/api/1/jwt/game/..%2F..%2Fevil/purchases?email=a%40b.c",
        );

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();
        requester
            .get_game_purchases(
                "../../evil",
                &PurchaseLookup::Email("a@b.c".to_owned()),
                handler,
            )
            .await
            .unwrap();

        assert!(receiver.recv().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_without_api_key() {
        let mut client = MockHttpClient::new();
        client.expect_json_get().never();
        client.expect_json_post().never();

        let requester = ItchRequester::new(client, env_with_key(None));
        let (handler, _receiver) = capture();

        let result = requester.get_account_info(handler).await;

        assert_eq!(
            result,
            Err(Error::MissingConfiguration("ITCHIO_API_KEY".to_owned()))
        );
    }

    #[tokio::test]
    async fn test_get_credential_info() {
        let mut client = MockHttpClient::new();
        expect_get(&mut client, "https://itch.io/api/1/jwt/credentials/info");

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();
        requester.get_credential_info(handler).await.unwrap();

        assert!(receiver.recv().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_get_account_games() {
        let mut client = MockHttpClient::new();
        expect_get(&mut client, "https://itch.io/api/1/jwt/my-games");

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();
        requester.get_account_games(handler).await.unwrap();

        assert!(receiver.recv().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_get_game_download_keys() {
        let mut client = MockHttpClient::new();
        expect_get(
            &mut client,
            "https://itch.io/api/1/jwt/game/g1/download_keys?download_key=YWKse5jeAeuZ8w3a",
        );

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();
        requester
            .get_game_download_keys(
                "g1",
                &DownloadKeyLookup::DownloadKey("YWKse5jeAeuZ8w3a".to_owned()),
                handler,
            )
            .await
            .unwrap();

        assert!(receiver.recv().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_get_game_purchases() {
        let mut client = MockHttpClient::new();
        expect_get(
            &mut client,
            "https://itch.io/api/1/jwt/game/g1/purchases?user_id=1000",
        );

        let requester = ItchRequester::new(client, env_with_key(Some("abc123")));
        let (handler, receiver) = capture();
        requester
            .get_game_purchases("g1", &PurchaseLookup::UserId(1000), handler)
            .await
            .unwrap();

        assert!(receiver.recv().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_requests_against_server() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"games": [{"id": 3, "title": "X-Moon"}]}"#;

        let mock = server
            .mock("GET", "/my-games")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let base_url = Url::parse(&server.url()).unwrap();
        let requester =
            ItchRequester::with_base_url(ReqwestClient::new(), env_with_key(Some("abc123")), base_url);
        let (handler, receiver) = capture();
        requester.get_account_games(handler).await.unwrap();

        mock.assert_async().await;
        let games = receiver.recv().unwrap().unwrap();
        assert_eq!(games["games"][0]["title"], "X-Moon");
    }
}
