use clap::{Parser, Subcommand};
use eyre::Context;
use oauth2::basic::BasicTokenResponse;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_data_client::{
    ApiClient, ApiClientConfig, NoToken, OAuthManager, OAuthTokenProvider, StaticToken,
    TimeBoundAccessToken, TokenProvider, YouTubeApiClient,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Query the YouTube Data API and print the results as JSON.
struct Arguments {
    /// API key used for requests that aren't made on behalf of a user.
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: String,
    /// OAuth2 access token for requests made on behalf of a user.
    #[arg(
        long,
        env = "YOUTUBE_ACCESS_TOKEN",
        hide_env_values = true,
        conflicts_with = "tokens_file"
    )]
    access_token: Option<String>,
    /// JSON file holding an OAuth2 token response. It is refreshed as needed and written back.
    #[arg(
        long,
        env = "YOUTUBE_TOKENS_FILE",
        requires_all = ["client_id", "client_secret"]
    )]
    tokens_file: Option<PathBuf>,
    /// OAuth2 client the tokens file was issued to.
    #[arg(long, env = "YOUTUBE_CLIENT_ID")]
    client_id: Option<String>,
    #[arg(long, env = "YOUTUBE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,
    /// Deadline of each request, in seconds.
    #[arg(long, default_value_t = 15)]
    timeout: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Show an account's channel; the authorized user's without an ID.
    Account { id: Option<String> },
    /// Show channels.
    Channel {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Resolve a legacy username to its channel ID.
    UserChannel { username: String },
    /// List the channels an account is subscribed to; the authorized user's without an ID.
    Subscriptions { channel_id: Option<String> },
    /// Show playlists.
    Playlist {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List the videos of a playlist.
    PlaylistVideos {
        id: String,
        /// Maximum number of pages to fetch.
        #[arg(long)]
        max_pages: Option<usize>,
    },
    /// Show the duration and view count of videos.
    Videos {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Add a video to a playlist of the authorized user.
    AddToPlaylist { playlist_id: String, video_id: String },
}

/// Where bearer tokens for authorized requests come from.
#[derive(Debug, Clone)]
enum Credentials {
    None(NoToken),
    Static(StaticToken),
    OAuth(OAuthTokenProvider),
}

impl TokenProvider for Credentials {
    async fn access_token(&self) -> eyre::Result<String> {
        match self {
            Credentials::None(provider) => provider.access_token().await,
            Credentials::Static(provider) => provider.access_token().await,
            Credentials::OAuth(provider) => provider.access_token().await,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let args = Arguments::parse();

    let credentials = load_credentials(&args).await?;
    let config = ApiClientConfig::builder()
        .service("youtube")
        .version(3u32)
        .api_key(args.api_key.as_str())
        .timeout(Duration::from_secs(args.timeout))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("configure API client")?;
    let youtube = YouTubeApiClient::new(
        ApiClient::new(config, credentials.clone()).context("create API client")?,
    );

    let outcome = run(&youtube, args.command.clone()).await;

    // persist refreshed tokens even when the command itself failed
    if let (Credentials::OAuth(provider), Some(path)) = (&credentials, &args.tokens_file) {
        let json = serde_json::to_string(&provider.token().await).context("serialize tokens")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("write tokens to {}", path.display()))?;
    }

    outcome
}

async fn load_credentials(args: &Arguments) -> eyre::Result<Credentials> {
    if let Some(token) = &args.access_token {
        return Ok(Credentials::Static(StaticToken::new(token.as_str())));
    }
    let Some(path) = &args.tokens_file else {
        return Ok(Credentials::None(NoToken));
    };
    let (Some(client_id), Some(client_secret)) = (&args.client_id, &args.client_secret) else {
        eyre::bail!("a tokens file needs the OAuth2 client ID and secret");
    };

    let tokens = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read tokens from {}", path.display()))?;
    let token: BasicTokenResponse =
        serde_json::from_str(&tokens).context("parse YouTube access token")?;

    // the issue time of a stored token is unknown, so refresh it before first use
    Ok(Credentials::OAuth(OAuthTokenProvider::new(
        TimeBoundAccessToken::expired(token),
        OAuthManager::new(client_id.as_str(), client_secret.as_str()),
    )))
}

async fn run(youtube: &YouTubeApiClient<Credentials>, command: Command) -> eyre::Result<()> {
    match command {
        Command::Account { id } => {
            print_json(&youtube.get_account_info(id.as_deref()).await?)?;
        }
        Command::Channel { ids } => {
            print_json(&youtube.get_channels_info(&as_strs(&ids)).await?)?;
        }
        Command::UserChannel { username } => {
            print_json(&youtube.get_user_channel_id(&username).await?)?;
        }
        Command::Subscriptions { channel_id } => {
            print_json(
                &youtube
                    .get_subscribed_channels(channel_id.as_deref())
                    .await?,
            )?;
        }
        Command::Playlist { ids } => {
            print_json(&youtube.get_playlists(&as_strs(&ids)).await?)?;
        }
        Command::PlaylistVideos { id, max_pages } => {
            let mut pages = 0;
            let videos = youtube
                .get_playlist_videos(&id, |_| {
                    pages += 1;
                    max_pages.is_none_or(|max| pages < max)
                })
                .await?;
            print_json(&videos)?;
        }
        Command::Videos { ids } => {
            print_json(&youtube.get_videos_meta_data(&as_strs(&ids)).await?)?;
        }
        Command::AddToPlaylist {
            playlist_id,
            video_id,
        } => {
            youtube.add_playlist_item(&playlist_id, &video_id).await?;
            eprintln!("added {video_id} to {playlist_id}");
        }
    }
    Ok(())
}

fn as_strs(ids: &[String]) -> Vec<&str> {
    ids.iter().map(String::as_str).collect()
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}
