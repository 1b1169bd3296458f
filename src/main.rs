//! itchio-launcher - check the itch.io launcher integration of a game.
//!
//! This binary reads the credentials the itch.io launcher injects into the
//! environment and calls the itch.io JWT API with them. It is meant to be run
//! from the itch.io app (or with the variables exported by hand) to check that
//! a game build receives a working API key.
//!
//! # Usage
//!
//! ```bash
//! itchio-launcher verify
//! itchio-launcher me
//! itchio-launcher download-keys 3 --download-key YWKse5jeAeuZ8w3a5qO2b2PId1sChw2B9b637w6z
//! itchio-launcher purchases 3 --email person@example.com
//! itchio-launcher request --method POST https://itch.io/api/1/jwt/credentials/info
//! ```
//!
//! # Environment Variables
//!
//! - `ITCHIO_API_KEY` - JWT API key injected by the launcher
//! - `ITCHIO_API_KEY_EXPIRES_AT` - Expiration date of the API key
//! - `ITCHIO_CLI_API__URL` - Overrides the base URL of the API
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::process::ExitCode;
use std::sync::mpsc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use env_logger::Env;
use log::{error, info, warn};
use reqwest::Url;

use itchio_launcher::api::{
    DownloadKeyLookup, HttpResult, ItchRequester, PurchaseLookup, ReqwestClient, ResponseHandler,
};
use itchio_launcher::config::Config;
use itchio_launcher::launcher::{self, ProcessEnv};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to an optional YAML configuration file.
    ///
    /// ```yaml
    /// api:
    ///   url: "https://itch.io/api/1/jwt"
    /// ```
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether the game was launched from the itch.io app
    Verify,
    #[command(flatten)]
    Api(ApiCommand),
}

/// Commands sending a request to the itch.io API.
#[derive(Subcommand, Debug)]
enum ApiCommand {
    /// Show the scopes and expiration of the API key
    Credentials,
    /// Show the profile of the authenticated user
    Me,
    /// List the games the user uploaded or collaborates on
    MyGames,
    /// Look up the download keys of a game
    DownloadKeys {
        /// Game identifier, as listed by `my-games`
        game_id: String,
        #[command(flatten)]
        lookup: DownloadKeyArgs,
    },
    /// Look up the completed purchases of a game
    Purchases {
        /// Game identifier, as listed by `my-games`
        game_id: String,
        #[command(flatten)]
        lookup: PurchaseArgs,
    },
    /// Send an authenticated request to any URL
    Request {
        /// HTTP method, GET or POST (GET when omitted)
        #[arg(short, long)]
        method: Option<String>,
        /// Full URL of the request
        url: String,
    },
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct DownloadKeyArgs {
    /// Download key to look up
    #[arg(long)]
    download_key: Option<String>,
    /// User identifier to look up download keys for
    #[arg(long)]
    user_id: Option<u64>,
    /// E-mail to look up download keys for
    #[arg(long)]
    email: Option<String>,
}

impl DownloadKeyArgs {
    fn into_lookup(self) -> Option<DownloadKeyLookup> {
        match (self.download_key, self.user_id, self.email) {
            (Some(key), _, _) => Some(DownloadKeyLookup::DownloadKey(key)),
            (_, Some(user_id), _) => Some(DownloadKeyLookup::UserId(user_id)),
            (_, _, Some(email)) => Some(DownloadKeyLookup::Email(email)),
            _ => None,
        }
    }
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct PurchaseArgs {
    /// User identifier to look up purchases for
    #[arg(long)]
    user_id: Option<u64>,
    /// E-mail to look up purchases for
    #[arg(long)]
    email: Option<String>,
}

impl PurchaseArgs {
    fn into_lookup(self) -> Option<PurchaseLookup> {
        match (self.user_id, self.email) {
            (Some(user_id), _) => Some(PurchaseLookup::UserId(user_id)),
            (_, Some(email)) => Some(PurchaseLookup::Email(email)),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, anyhow::Error> {
    info!("Starting itchio-launcher {}...", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Verify => Ok(verify()),
        Command::Api(command) => request(command, args.config.as_deref()).await,
    }
}

/// Sends the request of `command` and prints the JSON response.
async fn request(command: ApiCommand, config_path: Option<&str>) -> Result<ExitCode, anyhow::Error> {
    let config = Config::load(config_path).context("failed to load config")?;
    let base_url = Url::parse(&config.api.url)
        .with_context(|| format!("invalid API url {}", config.api.url))?;
    if base_url.cannot_be_a_base() {
        anyhow::bail!("invalid API url {}", config.api.url);
    }
    let requester = ItchRequester::with_base_url(ReqwestClient::new(), ProcessEnv, base_url);

    let (sender, receiver) = mpsc::channel();
    let handler: ResponseHandler = Box::new(move |result: HttpResult| {
        // The receiver outlives every request
        let _ = sender.send(result);
    });

    match command {
        ApiCommand::Credentials => requester.get_credential_info(handler).await?,
        ApiCommand::Me => requester.get_account_info(handler).await?,
        ApiCommand::MyGames => requester.get_account_games(handler).await?,
        ApiCommand::DownloadKeys { game_id, lookup } => {
            let lookup = lookup
                .into_lookup()
                .context("one of --download-key, --user-id or --email is required")?;
            requester
                .get_game_download_keys(&game_id, &lookup, handler)
                .await?
        }
        ApiCommand::Purchases { game_id, lookup } => {
            let lookup = lookup
                .into_lookup()
                .context("one of --user-id or --email is required")?;
            requester
                .get_game_purchases(&game_id, &lookup, handler)
                .await?
        }
        ApiCommand::Request {
            method: Some(method),
            url,
        } => requester.dispatch(&url, &method, handler).await?,
        ApiCommand::Request { method: None, url } => {
            requester.dispatch_get(&url, handler).await?
        }
    }

    let response = receiver
        .recv()
        .context("request finished without a response")?
        .context("request failed")?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(ExitCode::SUCCESS)
}

/// Prints whether the game was launched from the itch.io app.
fn verify() -> ExitCode {
    if !launcher::verify_launched() {
        println!("not launched from itch.io");
        return ExitCode::FAILURE;
    }

    match launcher::get_api_key_expiration() {
        Ok(expires_at) => println!("launched from itch.io, API key expires at {}", expires_at),
        Err(e) => {
            warn!("{}", e);
            println!("launched from itch.io, API key expiration unknown");
        }
    }

    ExitCode::SUCCESS
}
