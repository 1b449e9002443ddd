//! Configuration of an [`ApiClient`](crate::ApiClient).

use derive_builder::Builder;
use std::time::Duration;

/// Base URL of Google's REST APIs.
pub const API_BASE: &str = "https://www.googleapis.com/";

/// How long a single request may take before it fails with a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Identifies the Google REST service to talk to and how to reach it.
///
/// Requests are sent below `<base_url><service>/v<version>/`.
///
/// ```
/// use youtube_data_client::ApiClientConfig;
///
/// let config = ApiClientConfig::builder()
///     .service("youtube")
///     .version(3u32)
///     .api_key("my-api-key")
///     .build()
///     .unwrap();
/// assert_eq!(config.service_url(), "https://www.googleapis.com/youtube/v3/");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ApiClientConfig {
    /// The service to access, for example `youtube`.
    #[builder(setter(into))]
    pub(crate) service: String,

    /// The major version of the service's REST API, for example `3`.
    pub(crate) version: u32,

    /// The API key sent with requests that are not authorized by a user.
    #[builder(setter(into))]
    pub(crate) api_key: String,

    #[builder(setter(into), default = "API_BASE.to_string()")]
    pub(crate) base_url: String,

    /// Deadline for each individual request.
    #[builder(default = "DEFAULT_TIMEOUT")]
    pub(crate) timeout: Duration,

    #[builder(setter(into, strip_option), default)]
    pub(crate) user_agent: Option<String>,
}

impl ApiClientConfig {
    pub fn builder() -> ApiClientConfigBuilder {
        ApiClientConfigBuilder::default()
    }

    /// Configuration for version 3 of the YouTube Data API with default settings.
    pub fn youtube(api_key: impl Into<String>) -> Result<Self, ApiClientConfigBuilderError> {
        Self::builder()
            .service("youtube")
            .version(3u32)
            .api_key(api_key)
            .build()
    }

    /// The URL all request paths are relative to.
    pub fn service_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/{}/v{}/", self.service, self.version)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ApiClientConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(service) = &self.service
            && (service.is_empty() || service.contains('/'))
        {
            return Err(format!("invalid service name {service:?}"));
        }

        if let Some(api_key) = &self.api_key
            && api_key.is_empty()
        {
            return Err("the API key must not be empty".to_string());
        }

        if let Some(base_url) = &self.base_url
            && !(base_url.starts_with("https://") || base_url.starts_with("http://"))
        {
            return Err(format!("base URL {base_url:?} is not an absolute http(s) URL"));
        }

        if let Some(timeout) = self.timeout
            && timeout.is_zero()
        {
            return Err("the request timeout must not be zero".to_string());
        }

        Ok(())
    }
}

impl From<ApiClientConfigBuilderError> for crate::Error {
    fn from(err: ApiClientConfigBuilderError) -> Self {
        crate::Error::Config(err.to_string())
    }
}
