//! YouTube Videos API types.
//!
//! See: <https://developers.google.com/youtube/v3/docs/videos>

use crate::youtube_api::types::required;
use jiff::{Span, SpanRelativeTo, Unit};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub(crate) const VIDEO_PARTS: &str = "contentDetails,statistics";
pub(crate) const VIDEO_FIELDS: &str = "items(id,contentDetails/duration,statistics/viewCount)";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoResource {
    id: String,
    #[serde(default)]
    content_details: Option<VideoContentDetails>,
    #[serde(default)]
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
struct VideoContentDetails {
    /// ISO 8601 duration, e.g. `PT7M39S`.
    duration: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    /// Counters are delivered as decimal strings.
    #[serde(default)]
    view_count: Option<String>,
}

/// Playback length and popularity of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VideoResource")]
pub struct VideoMetaData {
    pub id: String,
    pub duration: Duration,
    /// `None` when the owner hides the statistics.
    pub view_count: Option<u64>,
}

impl TryFrom<VideoResource> for VideoMetaData {
    type Error = String;

    fn try_from(video: VideoResource) -> Result<Self, Self::Error> {
        let details = required(video.content_details, "video", "contentDetails")?;
        let duration = parse_duration(&details.duration)?;
        let view_count = video
            .statistics
            .and_then(|statistics| statistics.view_count)
            .map(|count| {
                count
                    .parse::<u64>()
                    .map_err(|e| format!("invalid view count {count:?}: {e}"))
            })
            .transpose()?;
        Ok(Self {
            id: video.id,
            duration,
            view_count,
        })
    }
}

/// Parses an ISO 8601 duration as used by YouTube, e.g. `PT7M39S` or `P1DT36M50S`.
///
/// Days are taken to be 24 hours long.
pub fn parse_duration(duration: &str) -> Result<Duration, String> {
    let span: Span = duration
        .parse()
        .map_err(|e| format!("invalid duration {duration:?}: {e}"))?;
    let seconds = span
        .total((Unit::Second, SpanRelativeTo::days_are_24_hours()))
        .map_err(|e| format!("invalid duration {duration:?}: {e}"))?;
    if seconds < 0.0 {
        return Err(format!("negative duration {duration:?}"));
    }
    Ok(Duration::from_secs_f64(seconds))
}
