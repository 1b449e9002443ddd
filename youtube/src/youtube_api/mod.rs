//! Typed access to the YouTube Data API v3.
//!
//! [`YouTubeApiClient`] maps the channel, subscription, playlist and video endpoints onto
//! methods returning plain Rust types. Each request asks only for the resource parts and fields
//! its result type needs, and the wire resources are converted into those types while the
//! response is deserialized, so a response missing a requested part fails with
//! [`Error::BodyParse`](crate::Error::BodyParse).
//!
//! The result types are therefore not symmetric under serde: `Deserialize` reads the API's
//! resource representation, while `Serialize` writes the flat Rust field layout (snake_case
//! names, `Duration` as `secs`/`nanos`). Serialized values are meant for output and can't be
//! read back with the same type.
//!
//! Read operations are authorized by the API key, except where they act on the user's own
//! account (`mine=true`). Adding to a playlist always needs the user's OAuth2 token.
//!
//! # Example
//!
//! ```rust,no_run
//! use youtube_data_client::{NoToken, YouTubeApiClient};
//!
//! # async fn example() -> youtube_data_client::Result<()> {
//! let youtube = YouTubeApiClient::from_api_key("my-api-key", NoToken)?;
//! if let Some(uploads) = youtube.get_uploads_playlist_id("UC9-y-6csu5WGm29I7JiwpnA").await? {
//!     // stop once a page contains a video we have seen before
//!     let videos = youtube
//!         .get_playlist_videos(&uploads, |page| page.iter().all(|v| v.id != "GSIDS_lvRv4"))
//!         .await?;
//!     println!("{} new videos", videos.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod playlists;
pub mod subscriptions;
pub mod types;
pub mod videos;

pub use client::YouTubeApiClient;
pub use types::{Thumbnail, Thumbnails};

pub use channels::{AccountInfo, AccountPlaylists, ChannelInfo, UploadsPlaylist};
pub use playlist_items::PlaylistVideo;
pub use playlists::{PlaylistInfo, PlaylistThumbnails, PlaylistVideoCount};
pub use subscriptions::SubscribedChannel;
pub use videos::{VideoMetaData, parse_duration};
