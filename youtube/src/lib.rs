//! A thin client for the YouTube Data REST API.
//!
//! The crate has two layers:
//!
//! * [`ApiClient`] is a generic client for one Google REST service. It builds request URLs,
//!   encodes parameters, authorizes requests by API key or OAuth2 bearer token, and classifies
//!   every failure as an [`Error`]. [`ApiClient::list_all`] aggregates paginated list endpoints.
//! * [`YouTubeApiClient`] maps the channel, subscription, playlist and video endpoints of the
//!   YouTube Data API v3 to typed methods.
//!
//! Bearer tokens come from a [`TokenProvider`]: a [`StaticToken`], an [`OAuthTokenProvider`]
//! that refreshes itself, or [`NoToken`] for clients that only use the API key.

pub mod api_client;
pub mod config;
pub mod error;
pub mod oauth;
pub mod pagination;
pub mod token;
pub mod youtube_api;

pub use api_client::{AbortHandle, ApiClient, encode_query};
pub use config::{ApiClientConfig, ApiClientConfigBuilder};
pub use error::{Error, GoogleApiError, GoogleApiErrorDetail, Result};
pub use oauth::{OAuthManager, OAuthTokenProvider, TimeBoundAccessToken};
pub use pagination::{Page, PageInfo};
pub use token::{NoToken, StaticToken, TokenProvider};
pub use youtube_api::{
    AccountInfo, AccountPlaylists, ChannelInfo, PlaylistInfo, PlaylistThumbnails, PlaylistVideo,
    PlaylistVideoCount, SubscribedChannel, Thumbnail, Thumbnails, UploadsPlaylist, VideoMetaData,
    YouTubeApiClient,
};
