//! YouTube Subscriptions API types.
//!
//! See: <https://developers.google.com/youtube/v3/docs/subscriptions>

use crate::youtube_api::types::{ResourceId, Thumbnails, required};
use serde::{Deserialize, Serialize};

pub(crate) const SUBSCRIPTION_PARTS: &str = "snippet,contentDetails";
pub(crate) const SUBSCRIPTION_FIELDS: &str = "nextPageToken,\
    items(snippet(title,resourceId/channelId,thumbnails),contentDetails/totalItemCount)";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscriptionResource {
    snippet: SubscriptionSnippet,
    #[serde(default)]
    content_details: Option<SubscriptionContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionSnippet {
    /// The title of the subscribed channel.
    title: String,
    resource_id: ResourceId,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionContentDetails {
    total_item_count: u64,
}

/// A channel a user is subscribed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubscriptionResource")]
pub struct SubscribedChannel {
    /// The ID of the subscribed channel.
    pub id: String,
    pub title: String,
    /// The number of videos the channel has published.
    pub video_count: u64,
    pub thumbnails: Thumbnails,
}

impl TryFrom<SubscriptionResource> for SubscribedChannel {
    type Error = String;

    fn try_from(subscription: SubscriptionResource) -> Result<Self, Self::Error> {
        let snippet = subscription.snippet;
        let details = required(subscription.content_details, "subscription", "contentDetails")?;
        Ok(Self {
            id: required(snippet.resource_id.channel_id, "subscription", "channel id")?,
            title: snippet.title,
            video_count: details.total_item_count,
            thumbnails: snippet.thumbnails,
        })
    }
}
