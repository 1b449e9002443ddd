//! YouTube Playlists API types.
//!
//! See: <https://developers.google.com/youtube/v3/docs/playlists>

use crate::youtube_api::types::{Thumbnails, required};
use serde::{Deserialize, Serialize};

pub(crate) const PLAYLIST_PARTS: &str = "snippet,contentDetails";
pub(crate) const PLAYLIST_FIELDS: &str =
    "items(id,snippet(title,description,channelId,thumbnails),contentDetails/itemCount)";

pub(crate) const VIDEO_COUNT_PARTS: &str = "contentDetails";
pub(crate) const VIDEO_COUNT_FIELDS: &str = "items(id,contentDetails/itemCount)";

pub(crate) const THUMBNAIL_PARTS: &str = "snippet";
pub(crate) const THUMBNAIL_FIELDS: &str = "items(id,snippet/thumbnails)";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaylistResource {
    id: String,
    #[serde(default)]
    snippet: Option<PlaylistSnippet>,
    #[serde(default)]
    content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistContentDetails {
    item_count: u64,
}

/// Information about a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlaylistResource")]
pub struct PlaylistInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    /// The channel that owns the playlist.
    pub channel_id: String,
    pub video_count: u64,
    pub thumbnails: Thumbnails,
}

impl TryFrom<PlaylistResource> for PlaylistInfo {
    type Error = String;

    fn try_from(playlist: PlaylistResource) -> Result<Self, Self::Error> {
        let snippet = required(playlist.snippet, "playlist", "snippet")?;
        let details = required(playlist.content_details, "playlist", "contentDetails")?;
        Ok(Self {
            id: playlist.id,
            title: snippet.title,
            description: snippet.description,
            channel_id: snippet.channel_id,
            video_count: details.item_count,
            thumbnails: snippet.thumbnails,
        })
    }
}

/// The number of videos in a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlaylistResource")]
pub struct PlaylistVideoCount {
    pub id: String,
    pub video_count: u64,
}

impl TryFrom<PlaylistResource> for PlaylistVideoCount {
    type Error = String;

    fn try_from(playlist: PlaylistResource) -> Result<Self, Self::Error> {
        let details = required(playlist.content_details, "playlist", "contentDetails")?;
        Ok(Self {
            id: playlist.id,
            video_count: details.item_count,
        })
    }
}

/// The thumbnails of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlaylistResource")]
pub struct PlaylistThumbnails {
    pub id: String,
    pub thumbnails: Thumbnails,
}

impl TryFrom<PlaylistResource> for PlaylistThumbnails {
    type Error = String;

    fn try_from(playlist: PlaylistResource) -> Result<Self, Self::Error> {
        let snippet = required(playlist.snippet, "playlist", "snippet")?;
        Ok(Self {
            id: playlist.id,
            thumbnails: snippet.thumbnails,
        })
    }
}
