//! Types shared by several YouTube resources.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The most ids a single `list` request accepts in its `id` parameter.
pub(crate) const MAX_IDS_PER_REQUEST: usize = 50;

/// Page size requested from paginated endpoints; the API's maximum.
pub(crate) const MAX_RESULTS: &str = "50";

/// Thumbnail images keyed by quality (`default`, `medium`, `high`, `standard`, `maxres`).
pub type Thumbnails = BTreeMap<String, Thumbnail>;

/// A thumbnail image.
///
/// See: <https://developers.google.com/youtube/v3/docs/thumbnails>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// The image's URL.
    pub url: String,
    /// The image's width, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Identifies the resource an item (subscription, playlist item, ...) refers to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceId {
    #[serde(default)]
    pub(crate) channel_id: Option<String>,
    #[serde(default)]
    pub(crate) video_id: Option<String>,
}

/// Unwraps a part of a resource the request asked for.
///
/// Used by resource conversions, so a missing part surfaces as a body parse error.
pub(crate) fn required<T>(value: Option<T>, resource: &str, part: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("{resource} is missing its {part}"))
}
