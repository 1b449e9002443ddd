//! Sources of OAuth2 bearer tokens for authorized requests.

use std::future::Future;

/// Produces OAuth2 access tokens on demand.
///
/// The [`ApiClient`](crate::ApiClient) awaits a fresh token before sending each authorized
/// request. A failure is surfaced to the caller as [`Error::Auth`](crate::Error::Auth).
pub trait TokenProvider: Send + Sync {
    /// Returns the access token to use for the next authorized request.
    fn access_token(&self) -> impl Future<Output = eyre::Result<String>> + Send;
}

/// A fixed access token, obtained elsewhere.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    async fn access_token(&self) -> eyre::Result<String> {
        Ok(self.0.clone())
    }
}

/// Provider for clients that only ever use the API key.
///
/// Any authorized request made through it fails with an authentication error.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    async fn access_token(&self) -> eyre::Result<String> {
        eyre::bail!("no OAuth2 credentials are configured for this client")
    }
}
