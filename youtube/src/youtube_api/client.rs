//! The YouTube domain client.

use crate::api_client::ApiClient;
use crate::config::ApiClientConfig;
use crate::error::Result;
use crate::pagination::Page;
use crate::token::{NoToken, TokenProvider};
use crate::youtube_api::channels::{
    ACCOUNT_FIELDS, ACCOUNT_PARTS, AccountInfo, CHANNEL_ID_FIELDS, CHANNEL_INFO_FIELDS,
    CHANNEL_INFO_PARTS, ChannelIdentity, ChannelInfo, UPLOADS_FIELDS, UploadsPlaylist,
};
use crate::youtube_api::playlist_items::{
    INSERT_PATH, NewPlaylistItem, PLAYLIST_VIDEO_FIELDS, PLAYLIST_VIDEO_PARTS, PlaylistVideo,
};
use crate::youtube_api::playlists::{
    PLAYLIST_FIELDS, PLAYLIST_PARTS, PlaylistInfo, PlaylistThumbnails, PlaylistVideoCount,
    THUMBNAIL_FIELDS, THUMBNAIL_PARTS, VIDEO_COUNT_FIELDS, VIDEO_COUNT_PARTS,
};
use crate::youtube_api::subscriptions::{
    SUBSCRIPTION_FIELDS, SUBSCRIPTION_PARTS, SubscribedChannel,
};
use crate::youtube_api::types::{MAX_IDS_PER_REQUEST, MAX_RESULTS};
use crate::youtube_api::videos::{VIDEO_FIELDS, VIDEO_PARTS, VideoMetaData};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;
use tokio_stream::Stream;
use tracing::instrument;

/// Client for the YouTube Data API v3.
///
/// Wraps an [`ApiClient`] for the `youtube` service. Operations that act on the user's own
/// account are authorized through the client's [`TokenProvider`]; everything else only needs
/// the API key.
pub struct YouTubeApiClient<P = NoToken> {
    api: ApiClient<P>,
}

impl<P> Clone for YouTubeApiClient<P> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<P> fmt::Debug for YouTubeApiClient<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeApiClient")
            .field("api", &self.api)
            .finish()
    }
}

impl<P: TokenProvider> YouTubeApiClient<P> {
    pub fn new(api: ApiClient<P>) -> Self {
        Self { api }
    }

    /// Creates a client for the public YouTube API endpoint.
    pub fn from_api_key(api_key: impl Into<String>, token_provider: P) -> Result<Self> {
        let api = ApiClient::new(ApiClientConfig::youtube(api_key)?, token_provider)?;
        Ok(Self::new(api))
    }

    /// The underlying REST client, for endpoints without a dedicated method.
    pub fn api_client(&self) -> &ApiClient<P> {
        &self.api
    }

    /// Retrieves the channel of an account.
    ///
    /// Without an `account_id`, this is the channel of the user owning the OAuth2 token.
    /// Returns `None` when no such channel exists.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn get_account_info(&self, account_id: Option<&str>) -> Result<Option<AccountInfo>> {
        let (filter, authorized) = match account_id {
            Some(id) => (("id", id), false),
            None => (("mine", "true"), true),
        };
        let page: Page<AccountInfo> = self
            .api
            .list(
                "channels",
                &[("part", ACCOUNT_PARTS), filter, ("fields", ACCOUNT_FIELDS)],
                authorized,
            )
            .await?;
        Ok(page.items.into_iter().next())
    }

    /// Looks up the ID of the channel belonging to a legacy YouTube username.
    #[instrument(skip(self))]
    pub async fn get_user_channel_id(&self, username: &str) -> Result<Option<String>> {
        let page: Page<ChannelIdentity> = self
            .api
            .list(
                "channels",
                &[
                    ("part", "id"),
                    ("forUsername", username),
                    ("fields", CHANNEL_ID_FIELDS),
                ],
                false,
            )
            .await?;
        Ok(page.items.into_iter().next().map(|channel| channel.id))
    }

    #[instrument(skip(self))]
    pub async fn get_channel_info(&self, channel_id: &str) -> Result<Option<ChannelInfo>> {
        Ok(self.get_channels_info(&[channel_id]).await?.into_iter().next())
    }

    /// Retrieves public information about channels.
    ///
    /// Channels that don't exist are left out of the result.
    #[instrument(skip(self))]
    pub async fn get_channels_info(&self, channel_ids: &[&str]) -> Result<Vec<ChannelInfo>> {
        self.list_by_ids(
            "channels",
            channel_ids,
            CHANNEL_INFO_PARTS,
            CHANNEL_INFO_FIELDS,
        )
        .await
    }

    /// Retrieves every channel an account is subscribed to.
    ///
    /// Without an `account_id`, lists the subscriptions of the user owning the OAuth2 token.
    /// All pages are fetched.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/subscriptions/list>
    #[instrument(skip(self))]
    pub async fn get_subscribed_channels(
        &self,
        account_id: Option<&str>,
    ) -> Result<Vec<SubscribedChannel>> {
        let (filter, authorized) = match account_id {
            Some(id) => (("channelId", id), false),
            None => (("mine", "true"), true),
        };
        let channels = self
            .api
            .list_all(
                "subscriptions",
                &[
                    ("part", SUBSCRIPTION_PARTS),
                    filter,
                    ("maxResults", MAX_RESULTS),
                    ("fields", SUBSCRIPTION_FIELDS),
                ],
                |_: &[SubscribedChannel]| true,
                authorized,
            )
            .await?;
        tracing::debug!(count = channels.len(), "fetched subscribed channels");
        Ok(channels)
    }

    /// Retrieves the ID of the playlist holding every video a channel uploaded.
    ///
    /// Returns `None` when the channel doesn't exist.
    #[instrument(skip(self))]
    pub async fn get_uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>> {
        let playlists = self.get_uploads_playlist_ids(&[channel_id]).await?;
        Ok(playlists
            .into_iter()
            .next()
            .map(|playlist| playlist.uploads_playlist_id))
    }

    #[instrument(skip(self))]
    pub async fn get_uploads_playlist_ids(
        &self,
        channel_ids: &[&str],
    ) -> Result<Vec<UploadsPlaylist>> {
        self.list_by_ids("channels", channel_ids, "contentDetails", UPLOADS_FIELDS)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_playlist_info(&self, playlist_id: &str) -> Result<Option<PlaylistInfo>> {
        Ok(self.get_playlists(&[playlist_id]).await?.into_iter().next())
    }

    /// Retrieves information about playlists.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlists/list>
    #[instrument(skip(self))]
    pub async fn get_playlists(&self, playlist_ids: &[&str]) -> Result<Vec<PlaylistInfo>> {
        self.list_by_ids("playlists", playlist_ids, PLAYLIST_PARTS, PLAYLIST_FIELDS)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_playlist_video_counts(
        &self,
        playlist_ids: &[&str],
    ) -> Result<Vec<PlaylistVideoCount>> {
        self.list_by_ids(
            "playlists",
            playlist_ids,
            VIDEO_COUNT_PARTS,
            VIDEO_COUNT_FIELDS,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_playlist_thumbnails(
        &self,
        playlist_ids: &[&str],
    ) -> Result<Vec<PlaylistThumbnails>> {
        self.list_by_ids("playlists", playlist_ids, THUMBNAIL_PARTS, THUMBNAIL_FIELDS)
            .await
    }

    /// Retrieves the videos of a playlist, newest additions last as the playlist orders them.
    ///
    /// `should_continue` is called with the videos of each page that has a successor and decides
    /// whether that successor is fetched.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self, should_continue))]
    pub async fn get_playlist_videos<F>(
        &self,
        playlist_id: &str,
        should_continue: F,
    ) -> Result<Vec<PlaylistVideo>>
    where
        F: FnMut(&[PlaylistVideo]) -> bool,
    {
        self.api
            .list_all(
                "playlistItems",
                &[
                    ("part", PLAYLIST_VIDEO_PARTS),
                    ("playlistId", playlist_id),
                    ("maxResults", MAX_RESULTS),
                    ("fields", PLAYLIST_VIDEO_FIELDS),
                ],
                should_continue,
                false,
            )
            .await
    }

    /// Returns a stream of the videos of a playlist, fetching pages as the stream is consumed.
    pub fn stream_playlist_videos<'a>(
        &'a self,
        playlist_id: &'a str,
    ) -> impl Stream<Item = Result<PlaylistVideo>> + 'a {
        self.api.stream_all(
            "playlistItems",
            vec![
                ("part", PLAYLIST_VIDEO_PARTS),
                ("playlistId", playlist_id),
                ("maxResults", MAX_RESULTS),
                ("fields", PLAYLIST_VIDEO_FIELDS),
            ],
            false,
        )
    }

    #[instrument(skip(self))]
    pub async fn get_video_meta_data(&self, video_id: &str) -> Result<Option<VideoMetaData>> {
        Ok(self.get_videos_meta_data(&[video_id]).await?.into_iter().next())
    }

    /// Retrieves the duration and view count of videos.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    pub async fn get_videos_meta_data(&self, video_ids: &[&str]) -> Result<Vec<VideoMetaData>> {
        self.list_by_ids("videos", video_ids, VIDEO_PARTS, VIDEO_FIELDS)
            .await
    }

    /// Appends a video to a playlist of the user owning the OAuth2 token.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/insert>
    #[instrument(skip(self))]
    pub async fn add_playlist_item(&self, playlist_id: &str, video_id: &str) -> Result<()> {
        let _: IgnoredAny = self
            .api
            .insert(
                INSERT_PATH,
                &NewPlaylistItem::video(playlist_id, video_id),
                true,
            )
            .await?;
        tracing::debug!("added video to playlist");
        Ok(())
    }

    /// Lists resources by ID, at most [`MAX_IDS_PER_REQUEST`] per request.
    ///
    /// Results keep the order of the requests. No request is made for an empty `ids`.
    async fn list_by_ids<T: DeserializeOwned>(
        &self,
        path: &str,
        ids: &[&str],
        part: &str,
        fields: &str,
    ) -> Result<Vec<T>> {
        let mut items = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            let id = chunk.join(",");
            let page: Page<T> = self
                .api
                .list(
                    path,
                    &[("part", part), ("id", id.as_str()), ("fields", fields)],
                    false,
                )
                .await?;
            items.extend(page.items);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::token::StaticToken;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tokio_stream::StreamExt;
    use wiremock::matchers::{
        body_json, header, method, path, query_param, query_param_is_missing,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "key";

    fn youtube_for<P: TokenProvider>(server: &MockServer, provider: P) -> YouTubeApiClient<P> {
        let config = ApiClientConfig::builder()
            .service("youtube")
            .version(3u32)
            .api_key(API_KEY)
            .base_url(server.uri())
            .timeout(Duration::from_secs(2))
            .build()
            .expect("valid config");
        YouTubeApiClient::new(ApiClient::new(config, provider).expect("api client"))
    }

    fn ok(body: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    fn playlist_item(video_id: &str) -> Value {
        json!({
            "snippet": {
                "publishedAt": "2020-01-01T00:00:00Z",
                "channelId": "UC1",
                "title": format!("video {video_id}"),
                "description": "",
                "thumbnails": {},
                "resourceId": {"kind": "youtube#video", "videoId": video_id}
            }
        })
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = YouTubeApiClient::from_api_key("", NoToken).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{err:?}");
    }

    #[tokio::test]
    async fn own_account_is_authorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .and(query_param("mine", "true"))
            .and(query_param("part", ACCOUNT_PARTS))
            .and(query_param_is_missing("key"))
            .and(header("Authorization", "Bearer t0k3n"))
            .respond_with(ok(json!({
                "items": [{
                    "id": "UC1",
                    "snippet": {"title": "Me"},
                    "contentDetails": {"relatedPlaylists": {"watchLater": "WL"}}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, StaticToken::new("t0k3n"));
        let account = youtube.get_account_info(None).await.unwrap().unwrap();
        assert_eq!(account.id, "UC1");
        assert_eq!(account.playlist_ids.watch_later.as_deref(), Some("WL"));
        assert_eq!(account.playlist_ids.watch_history, None);
    }

    #[tokio::test]
    async fn other_account_uses_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .and(query_param("id", "UC2"))
            .and(query_param("key", API_KEY))
            .and(query_param_is_missing("mine"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        // NoToken would fail any authorized request
        let youtube = youtube_for(&server, NoToken);
        assert_eq!(youtube.get_account_info(Some("UC2")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn resolves_username_to_channel_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .and(query_param("forUsername", "Computerphile"))
            .and(query_param("fields", CHANNEL_ID_FIELDS))
            .respond_with(ok(json!({"items": [{"id": "UC9-y-6csu5WGm29I7JiwpnA"}]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .and(query_param("forUsername", "nobody"))
            .respond_with(ok(json!({"pageInfo": {"totalResults": 0, "resultsPerPage": 5}})))
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, NoToken);
        assert_eq!(
            youtube.get_user_channel_id("Computerphile").await.unwrap(),
            Some("UC9-y-6csu5WGm29I7JiwpnA".to_string())
        );
        assert_eq!(youtube.get_user_channel_id("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn batches_are_split_at_fifty_ids() {
        let server = MockServer::start().await;
        let ids: Vec<String> = (0..51).map(|i| format!("v{i}")).collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();

        let video = |id: &str| json!({"id": id, "contentDetails": {"duration": "PT1M"}});
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .and(query_param("id", ids[..50].join(",")))
            .respond_with(ok(json!({"items": [video("v0"), video("v49")]})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .and(query_param("id", "v50"))
            .respond_with(ok(json!({"items": [video("v50")]})))
            .expect(1)
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, NoToken);
        let videos = youtube.get_videos_meta_data(&ids).await.unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["v0", "v49", "v50"]);
        assert_eq!(videos[2].duration, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let server = MockServer::start().await;
        let youtube = youtube_for(&server, NoToken);

        assert!(youtube.get_playlists(&[]).await.unwrap().is_empty());
        assert!(youtube.get_channels_info(&[]).await.unwrap().is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetches_every_subscription_page() {
        let server = MockServer::start().await;
        let subscription = |id: &str| {
            json!({
                "snippet": {"title": id, "resourceId": {"channelId": id}},
                "contentDetails": {"totalItemCount": 1}
            })
        };
        Mock::given(method("GET"))
            .and(path("/youtube/v3/subscriptions"))
            .and(query_param("channelId", "UC1"))
            .and(query_param("maxResults", "50"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ok(json!({
                "nextPageToken": "page2",
                "items": [subscription("a"), subscription("b")]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/subscriptions"))
            .and(query_param("pageToken", "page2"))
            .respond_with(ok(json!({"items": [subscription("c")]})))
            .expect(1)
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, NoToken);
        let channels = youtube.get_subscribed_channels(Some("UC1")).await.unwrap();
        let ids: Vec<&str> = channels.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn own_subscriptions_need_a_token() {
        let server = MockServer::start().await;
        let youtube = youtube_for(&server, NoToken);

        let err = youtube.get_subscribed_channels(None).await.unwrap_err();
        assert!(err.is_auth(), "{err:?}");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_channel_has_no_uploads_playlist() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .and(query_param("id", "UC404"))
            .and(query_param("part", "contentDetails"))
            .respond_with(ok(json!({"items": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/channels"))
            .and(query_param("id", "UC1"))
            .respond_with(ok(json!({
                "items": [{"id": "UC1", "contentDetails": {"relatedPlaylists": {"uploads": "UU1"}}}]
            })))
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, NoToken);
        assert_eq!(youtube.get_uploads_playlist_id("UC404").await.unwrap(), None);
        assert_eq!(
            youtube.get_uploads_playlist_id("UC1").await.unwrap().as_deref(),
            Some("UU1")
        );
    }

    #[tokio::test]
    async fn playlist_views_request_their_parts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlists"))
            .and(query_param("part", VIDEO_COUNT_PARTS))
            .and(query_param("id", "PL1,PL2"))
            .respond_with(ok(json!({"items": [
                {"id": "PL1", "contentDetails": {"itemCount": 4}},
                {"id": "PL2", "contentDetails": {"itemCount": 0}}
            ]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlists"))
            .and(query_param("part", THUMBNAIL_PARTS))
            .respond_with(ok(json!({"items": [
                {"id": "PL1", "snippet": {"thumbnails": {"default": {"url": "https://i.ytimg.com/1.jpg"}}}}
            ]})))
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, NoToken);
        let counts = youtube
            .get_playlist_video_counts(&["PL1", "PL2"])
            .await
            .unwrap();
        assert_eq!(
            counts,
            vec![
                PlaylistVideoCount {
                    id: "PL1".to_string(),
                    video_count: 4
                },
                PlaylistVideoCount {
                    id: "PL2".to_string(),
                    video_count: 0
                },
            ]
        );

        let thumbnails = youtube.get_playlist_thumbnails(&["PL1"]).await.unwrap();
        assert_eq!(
            thumbnails[0].thumbnails["default"].url,
            "https://i.ytimg.com/1.jpg"
        );
    }

    #[tokio::test]
    async fn playlist_videos_stop_when_asked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .and(query_param("playlistId", "UU1"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ok(json!({
                "nextPageToken": "page2",
                "items": [playlist_item("new"), playlist_item("seen")]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .and(query_param("pageToken", "page2"))
            .respond_with(ok(json!({"items": [playlist_item("old")]})))
            .expect(0)
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, NoToken);
        let videos = youtube
            .get_playlist_videos("UU1", |page| page.iter().all(|video| video.id != "seen"))
            .await
            .unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["new", "seen"]);
    }

    #[tokio::test]
    async fn streams_playlist_videos_across_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ok(json!({"nextPageToken": "p2", "items": [playlist_item("a")]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/playlistItems"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ok(json!({"items": [playlist_item("b")]})))
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, NoToken);
        let mut stream = std::pin::pin!(youtube.stream_playlist_videos("PL1"));
        let mut ids = Vec::new();
        while let Some(video) = stream.next().await {
            ids.push(video.unwrap().id);
        }
        assert_eq!(ids, ["a", "b"]);
    }

    #[tokio::test]
    async fn malformed_duration_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .respond_with(ok(json!({
                "items": [{"id": "v", "contentDetails": {"duration": "forever"}}]
            })))
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, NoToken);
        let err = youtube.get_video_meta_data("v").await.unwrap_err();
        assert!(matches!(err, Error::BodyParse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn adds_video_to_playlist() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/youtube/v3/playlistItems"))
            .and(query_param("part", "snippet"))
            .and(query_param_is_missing("key"))
            .and(header("Authorization", "Bearer t0k3n"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "snippet": {
                    "playlistId": "PL1",
                    "resourceId": {"kind": "youtube#video", "videoId": "v1"}
                }
            })))
            .respond_with(ok(json!({"kind": "youtube#playlistItem", "id": "item1"})))
            .expect(1)
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, StaticToken::new("t0k3n"));
        youtube.add_playlist_item("PL1", "v1").await.unwrap();
    }

    #[tokio::test]
    async fn rejected_insert_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/youtube/v3/playlistItems"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "Forbidden",
                    "errors": [{"domain": "youtube.playlistItem", "reason": "playlistItemsNotAccessible", "message": "Forbidden"}]
                }
            })))
            .mount(&server)
            .await;

        let youtube = youtube_for(&server, StaticToken::new("t0k3n"));
        let err = youtube.add_playlist_item("PL1", "v1").await.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
        let api_error = err.api_error().unwrap();
        assert_eq!(
            api_error.errors[0].reason.as_deref(),
            Some("playlistItemsNotAccessible")
        );
    }
}
