//! Errors produced while talking to a Google REST API.
//!
//! Every failure is scoped to the single request (or page aggregation) that produced it. Nothing
//! is retried here; retry policy is left to the caller.

use http::{Method, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All the ways a request to the REST API can fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request was cancelled through an [`AbortHandle`](crate::AbortHandle).
    #[error("the {method} request to {url} has been aborted")]
    Aborted { method: Method, url: String },

    /// The request could not be delivered or its response could not be read.
    #[error("a network error occurred during the {method} request to {url}")]
    Network {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured deadline.
    #[error("the {method} request to {url} timed out, the timeout is set to {timeout:?}")]
    Timeout {
        method: Method,
        url: String,
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status other than `200 OK`.
    #[error("the Google API rejected the {method} request to {url} with {status}")]
    Api {
        method: Method,
        url: String,
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The server answered `200 OK` but the body is not the expected JSON document.
    #[error("cannot parse the response body of the {method} request to {url}")]
    BodyParse {
        method: Method,
        url: String,
        /// The raw response body.
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The token provider failed to produce an OAuth2 bearer token.
    #[error("failed to obtain an OAuth2 access token")]
    Auth(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn auth(report: eyre::Report) -> Self {
        Self::Auth(report.into())
    }

    /// Classifies a transport-level failure of a request.
    pub(crate) fn transport(
        method: Method,
        url: String,
        timeout: Duration,
        source: reqwest::Error,
    ) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                method,
                url,
                timeout,
                source,
            }
        } else {
            Self::Network {
                method,
                url,
                source,
            }
        }
    }

    /// The HTTP status code of an [`Error::Api`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response body, for failures that received one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } | Self::BodyParse { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Decodes the Google error document carried by an [`Error::Api`] failure, if any.
    pub fn api_error(&self) -> Option<GoogleApiError> {
        let Self::Api { body, .. } = self else {
            return None;
        };
        serde_json::from_str::<GoogleErrorDocument>(body)
            .ok()
            .map(|document| document.error)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDocument {
    error: GoogleApiError,
}

/// The error document Google APIs return alongside a failure status.
///
/// See: <https://cloud.google.com/apis/design/errors#http_mapping>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleApiError {
    /// The HTTP status code repeated in the body.
    pub code: u16,
    pub message: String,
    /// Detailed causes of the failure.
    #[serde(default)]
    pub errors: Vec<GoogleApiErrorDetail>,
}

/// One cause listed in a [`GoogleApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleApiErrorDetail {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn api_error(body: &str) -> Error {
        Error::Api {
            method: Method::POST,
            url: "https://www.googleapis.com/youtube/v3/playlistItems?part=snippet".to_string(),
            status: StatusCode::UNAUTHORIZED,
            body: body.to_string(),
        }
    }

    #[test]
    fn decodes_google_error_document() {
        let error = api_error(
            r#"{
                "error": {
                    "code": 401,
                    "message": "Login Required.",
                    "errors": [
                        {"message": "Login Required.", "domain": "global", "reason": "required"}
                    ]
                }
            }"#,
        );

        assert_eq!(error.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(
            error.api_error(),
            Some(GoogleApiError {
                code: 401,
                message: "Login Required.".to_string(),
                errors: vec![GoogleApiErrorDetail {
                    domain: Some("global".to_string()),
                    reason: Some("required".to_string()),
                    message: Some("Login Required.".to_string()),
                }],
            })
        );
    }

    #[test]
    fn api_error_without_error_document() {
        let error = api_error("<html>Bad gateway</html>");
        assert_eq!(error.api_error(), None);
        assert_eq!(error.body(), Some("<html>Bad gateway</html>"));
    }

    #[test]
    fn auth_error_keeps_the_cause() {
        let error = Error::auth(eyre::eyre!("token expired"));
        assert!(error.is_auth());
        assert!(error.status().is_none());
        let source = std::error::Error::source(&error).expect("auth error has a source");
        assert_eq!(source.to_string(), "token expired");
    }
}
