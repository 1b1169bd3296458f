//! URL templates of the itch.io JWT API.
//!
//! All endpoints live under [`DEFAULT_API_URL`] unless another base url is
//! given to the requester.

use reqwest::Url;

/// Base url of the itch.io API for JWT keys handed out by the launcher.
pub const DEFAULT_API_URL: &str = "https://itch.io/api/1/jwt";

/// Fixed endpoints of the itch.io JWT API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `credentials/info`: scopes granted by the key and its expiration date
    CredentialsInfo,
    /// `me`: public profile of the authenticated user
    Me,
    /// `my-games`: games the user uploaded or collaborates on
    MyGames,
    /// `game/{id}/download_keys`: download key lookup for a game
    GameDownloadKeys(&'a str),
    /// `game/{id}/purchases`: completed purchases of a game
    GamePurchases(&'a str),
}

impl<'a> Endpoint<'a> {
    /// Path segments of the endpoint relative to the API base url.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Endpoint::CredentialsInfo => vec!["credentials", "info"],
            Endpoint::Me => vec!["me"],
            Endpoint::MyGames => vec!["my-games"],
            Endpoint::GameDownloadKeys(game_id) => vec!["game", game_id, "download_keys"],
            Endpoint::GamePurchases(game_id) => vec!["game", game_id, "purchases"],
        }
    }

    /// Full url of the endpoint under `base_url`.
    ///
    /// Each segment is percent-encoded on its own, so a game id containing `/`
    /// stays a single segment. A `.` or `..` game id is dropped rather than
    /// resolved. A `base_url` that cannot be a base (e.g. `mailto:`) is
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use itchio_launcher::api::{DEFAULT_API_URL, Endpoint};
    /// use reqwest::Url;
    ///
    /// let base_url = Url::parse(DEFAULT_API_URL).unwrap();
    /// assert_eq!(
    ///     Endpoint::GameDownloadKeys("g1").url(&base_url).as_str(),
    ///     "https://itch.io/api/1/jwt/game/g1/download_keys"
    /// );
    /// ```
    pub fn url(&self, base_url: &Url) -> Url {
        let mut url = base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(self.segments());
        }
        url
    }
}

/// Criterion used to look up the download keys of a game.
///
/// The download key can be extracted from a buyer's download url, e.g.
/// `http://leafo.itch.io/x-moon/download/YWKse5jeAeuZ8w3a5qO2b2PId1sChw2B9b637w6z`
/// carries the key `YWKse5jeAeuZ8w3a5qO2b2PId1sChw2B9b637w6z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadKeyLookup {
    /// The download key itself
    DownloadKey(String),
    /// The itch.io user identifier
    UserId(u64),
    /// An e-mail address of the buyer
    Email(String),
}

impl DownloadKeyLookup {
    /// Appends the lookup as a query parameter of `url`.
    pub fn append_to(&self, url: &mut Url) {
        match self {
            DownloadKeyLookup::DownloadKey(key) => {
                url.query_pairs_mut().append_pair("download_key", key);
            }
            DownloadKeyLookup::UserId(user_id) => {
                url.query_pairs_mut()
                    .append_pair("user_id", &user_id.to_string());
            }
            DownloadKeyLookup::Email(email) => {
                url.query_pairs_mut().append_pair("email", email);
            }
        }
    }
}

/// Criterion used to look up the purchases of a game.
///
/// Only completed purchases are returned. Lookups by e-mail also match the
/// verified addresses linked to it, so the caller must verify the address
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseLookup {
    /// The itch.io user identifier
    UserId(u64),
    /// An e-mail address of the buyer
    Email(String),
}

impl PurchaseLookup {
    /// Appends the lookup as a query parameter of `url`.
    pub fn append_to(&self, url: &mut Url) {
        match self {
            PurchaseLookup::UserId(user_id) => {
                url.query_pairs_mut()
                    .append_pair("user_id", &user_id.to_string());
            }
            PurchaseLookup::Email(email) => {
                url.query_pairs_mut().append_pair("email", email);
            }
        }
    }
}
