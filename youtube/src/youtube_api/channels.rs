//! YouTube Channels API types.
//!
//! All channel views are decoded from the same [`ChannelResource`] wire shape; each request
//! only asks for the parts its view needs.
//!
//! See: <https://developers.google.com/youtube/v3/docs/channels>

use crate::youtube_api::types::{Thumbnails, required};
use serde::{Deserialize, Serialize};

pub(crate) const ACCOUNT_PARTS: &str = "id,snippet,contentDetails";
pub(crate) const ACCOUNT_FIELDS: &str =
    "items(id,snippet/title,contentDetails/relatedPlaylists(watchHistory,watchLater))";

pub(crate) const CHANNEL_ID_FIELDS: &str = "items/id";

pub(crate) const CHANNEL_INFO_PARTS: &str = "snippet,contentDetails";
pub(crate) const CHANNEL_INFO_FIELDS: &str =
    "items(id,snippet(title,thumbnails),contentDetails/relatedPlaylists/uploads)";

pub(crate) const UPLOADS_FIELDS: &str = "items(id,contentDetails/relatedPlaylists/uploads)";

/// A `channel` resource, restricted to the parts this crate reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelResource {
    id: String,
    #[serde(default)]
    snippet: Option<ChannelSnippet>,
    #[serde(default)]
    content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    #[serde(default)]
    related_playlists: RelatedPlaylists,
}

/// Playlists YouTube maintains for every channel.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedPlaylists {
    #[serde(default)]
    uploads: Option<String>,
    #[serde(default)]
    watch_history: Option<String>,
    #[serde(default)]
    watch_later: Option<String>,
}

impl ChannelResource {
    fn related_playlists(&mut self) -> RelatedPlaylists {
        self.content_details
            .take()
            .map(|details| details.related_playlists)
            .unwrap_or_default()
    }
}

/// Only the id of a channel.
#[derive(Debug, Deserialize)]
pub(crate) struct ChannelIdentity {
    pub(crate) id: String,
}

/// A user's channel, as seen by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChannelResource")]
pub struct AccountInfo {
    /// The ID of the account's channel.
    pub id: String,
    pub title: String,
    pub playlist_ids: AccountPlaylists,
}

/// The private playlists of an account.
///
/// YouTube no longer exposes these to API clients for most accounts, in which case both are
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPlaylists {
    pub watch_history: Option<String>,
    pub watch_later: Option<String>,
}

impl TryFrom<ChannelResource> for AccountInfo {
    type Error = String;

    fn try_from(mut channel: ChannelResource) -> Result<Self, Self::Error> {
        let playlists = channel.related_playlists();
        let snippet = required(channel.snippet, "channel", "snippet")?;
        Ok(Self {
            id: channel.id,
            title: snippet.title,
            playlist_ids: AccountPlaylists {
                watch_history: playlists.watch_history,
                watch_later: playlists.watch_later,
            },
        })
    }
}

/// Public information about a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChannelResource")]
pub struct ChannelInfo {
    pub id: String,
    pub title: String,
    /// The playlist holding every video the channel uploaded.
    pub uploads_playlist_id: Option<String>,
    pub thumbnails: Thumbnails,
}

impl TryFrom<ChannelResource> for ChannelInfo {
    type Error = String;

    fn try_from(mut channel: ChannelResource) -> Result<Self, Self::Error> {
        let playlists = channel.related_playlists();
        let snippet = required(channel.snippet, "channel", "snippet")?;
        Ok(Self {
            id: channel.id,
            title: snippet.title,
            uploads_playlist_id: playlists.uploads,
            thumbnails: snippet.thumbnails,
        })
    }
}

/// The uploads playlist of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChannelResource")]
pub struct UploadsPlaylist {
    /// The ID of the channel.
    pub id: String,
    pub uploads_playlist_id: String,
}

impl TryFrom<ChannelResource> for UploadsPlaylist {
    type Error = String;

    fn try_from(mut channel: ChannelResource) -> Result<Self, Self::Error> {
        let uploads = channel.related_playlists().uploads;
        Ok(Self {
            uploads_playlist_id: required(uploads, "channel", "uploads playlist")?,
            id: channel.id,
        })
    }
}
