//! YouTube PlaylistItems API types.
//!
//! See: <https://developers.google.com/youtube/v3/docs/playlistItems>

use crate::youtube_api::types::{ResourceId, Thumbnails, required};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub(crate) const PLAYLIST_VIDEO_PARTS: &str = "snippet";
pub(crate) const PLAYLIST_VIDEO_FIELDS: &str = "nextPageToken,\
    items/snippet(publishedAt,channelId,title,description,thumbnails,resourceId/videoId)";

/// Path of the insert endpoint; `part` tells the API which parts the body carries.
pub(crate) const INSERT_PATH: &str = "playlistItems?part=snippet";

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemResource {
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    published_at: Timestamp,
    channel_id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    resource_id: ResourceId,
}

/// A video listed in a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlaylistItemResource")]
pub struct PlaylistVideo {
    /// The ID of the video.
    pub id: String,
    pub title: String,
    pub description: String,
    /// When the video was added to the playlist.
    pub published_at: Timestamp,
    /// The channel the playlist item belongs to.
    pub channel_id: String,
    pub thumbnails: Thumbnails,
}

impl TryFrom<PlaylistItemResource> for PlaylistVideo {
    type Error = String;

    fn try_from(item: PlaylistItemResource) -> Result<Self, Self::Error> {
        let snippet = item.snippet;
        Ok(Self {
            id: required(snippet.resource_id.video_id, "playlist item", "video id")?,
            title: snippet.title,
            description: snippet.description,
            published_at: snippet.published_at,
            channel_id: snippet.channel_id,
            thumbnails: snippet.thumbnails,
        })
    }
}

/// Request body of `playlistItems.insert`, adding a video to a playlist.
#[derive(Debug, Serialize)]
pub(crate) struct NewPlaylistItem<'a> {
    snippet: NewPlaylistItemSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewPlaylistItemSnippet<'a> {
    playlist_id: &'a str,
    resource_id: VideoReference<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoReference<'a> {
    kind: &'static str,
    video_id: &'a str,
}

impl<'a> NewPlaylistItem<'a> {
    pub(crate) fn video(playlist_id: &'a str, video_id: &'a str) -> Self {
        Self {
            snippet: NewPlaylistItemSnippet {
                playlist_id,
                resource_id: VideoReference {
                    kind: "youtube#video",
                    video_id,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_playlist_video() {
        let video: PlaylistVideo = serde_json::from_value(json!({
            "snippet": {
                "publishedAt": "2016-03-29T17:55:42Z",
                "channelId": "UC9-y-6csu5WGm29I7JiwpnA",
                "title": "Public Key Cryptography",
                "description": "Spies used to meet in the park...",
                "thumbnails": {"default": {"url": "https://i.ytimg.com/vi/x/default.jpg", "width": 120, "height": 90}},
                "resourceId": {"kind": "youtube#video", "videoId": "GSIDS_lvRv4"}
            }
        }))
        .unwrap();

        assert_eq!(video.id, "GSIDS_lvRv4");
        assert_eq!(
            video.published_at,
            "2016-03-29T17:55:42Z".parse::<Timestamp>().unwrap()
        );
        assert_eq!(video.channel_id, "UC9-y-6csu5WGm29I7JiwpnA");
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let result = serde_json::from_value::<PlaylistVideo>(json!({
            "snippet": {
                "publishedAt": "yesterday",
                "channelId": "UC1",
                "title": "t",
                "resourceId": {"videoId": "v"}
            }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn insert_body_matches_api_shape() {
        let body = serde_json::to_value(NewPlaylistItem::video("PL1", "vhiiia1_hC4")).unwrap();
        assert_eq!(
            body,
            json!({
                "snippet": {
                    "playlistId": "PL1",
                    "resourceId": {"kind": "youtube#video", "videoId": "vhiiia1_hC4"}
                }
            })
        );
    }
}
