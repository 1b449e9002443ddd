//! OAuth 2.0 access tokens that refresh themselves.
//!
//! Obtaining the initial token (the interactive consent flow) happens elsewhere; this module
//! takes a persisted token response and keeps it usable by exchanging its refresh token with
//! Google's token endpoint whenever the access token expires.

use crate::token::TokenProvider;
use eyre::Context;
use oauth2::basic::{BasicClient, BasicErrorResponseType, BasicTokenResponse};
use oauth2::{ClientId, ClientSecret, RequestTokenError, TokenResponse, TokenUrl, reqwest};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tracing::instrument;

/// Google OAuth2 token endpoint URL used for token refresh.
pub const TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v3/token";

/// How long before its stated expiry an access token is already considered expired.
const EXPIRY_BUFFER: Duration = Duration::from_secs(300);

/// Assumed lifetime of a token whose response doesn't say, minus [`EXPIRY_BUFFER`].
const DEFAULT_LIFETIME: Duration = Duration::from_secs(3300);

/// Refreshes OAuth 2.0 tokens of one OAuth client application.
#[derive(Debug, Clone)]
pub struct OAuthManager {
    client_id: String,
    client_secret: String,
    token_url: String,
}

impl OAuthManager {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: TOKEN_URL.to_string(),
        }
    }

    /// Uses a different token endpoint than Google's.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Attempts to refresh an existing OAuth token using its refresh token.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(new_token))` - Refresh succeeded
    /// * `Ok(None)` - The token has no refresh token, or the server no longer accepts it
    /// * `Err(_)` - Network or other error occurred during the refresh attempt
    ///
    /// When refresh is impossible the user has to authorize the application again.
    pub async fn refresh_token(
        &self,
        token: &BasicTokenResponse,
    ) -> eyre::Result<Option<BasicTokenResponse>> {
        let Some(refresh_token) = token.refresh_token() else {
            tracing::warn!("no refresh token available, cannot refresh");
            return Ok(None);
        };

        tracing::debug!("attempting to refresh OAuth token");

        let client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_token_uri(
                TokenUrl::new(self.token_url.clone()).context("parse token endpoint URL")?,
            );

        let http_client = reqwest::ClientBuilder::new()
            // SSRF no thank you.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("build HTTP client for token refresh")?;

        match client
            .exchange_refresh_token(refresh_token)
            .request_async(&http_client)
            .await
        {
            Ok(new_token) => {
                tracing::debug!("successfully refreshed OAuth token");
                Ok(Some(new_token))
            }
            Err(ref e @ RequestTokenError::ServerResponse(ref sr))
                if matches!(sr.error(), BasicErrorResponseType::InvalidGrant) =>
            {
                tracing::warn!("OAuth refresh token considered invalid grant: {}", e);
                Ok(None)
            }
            Err(e) => Err(e).context("exchange refresh token"),
        }
    }
}

/// An OAuth token response together with the moment its access token stops being usable.
#[derive(Debug, Clone)]
pub struct TimeBoundAccessToken {
    token: BasicTokenResponse,
    /// When the access token expires, with a safety buffer.
    expires_at: SystemTime,
}

impl TimeBoundAccessToken {
    /// Wraps a freshly issued token, deriving its expiry from `expires_in`.
    pub fn new(token: BasicTokenResponse) -> Self {
        Self {
            expires_at: Self::calculate_token_expiry(&token),
            token,
        }
    }

    /// Wraps a token that must be refreshed before its first use.
    ///
    /// Suited for tokens loaded from storage, whose issue time is unknown.
    pub fn expired(token: BasicTokenResponse) -> Self {
        Self {
            expires_at: SystemTime::UNIX_EPOCH,
            token,
        }
    }

    pub fn raw_token(&self) -> &BasicTokenResponse {
        &self.token
    }

    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }

    /// Refreshes this token, preserving the refresh token if the server doesn't issue a new one.
    ///
    /// Returns `Ok(false)` when refreshing is impossible.
    pub async fn refresh(&mut self, oauth_manager: &OAuthManager) -> eyre::Result<bool> {
        tracing::trace!("refreshing token");
        match oauth_manager
            .refresh_token(&self.token)
            .await
            .context("refresh OAuth token")?
        {
            Some(new_token) => {
                let old_token = std::mem::replace(&mut self.token, new_token);
                if self.token.refresh_token().is_none() {
                    tracing::trace!("new token lacks refresh token, keeping the previous one");
                    self.token
                        .set_refresh_token(old_token.refresh_token().cloned());
                }
                self.expires_at = Self::calculate_token_expiry(&self.token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn calculate_token_expiry(token: &BasicTokenResponse) -> SystemTime {
        let now = SystemTime::now();
        match token.expires_in() {
            Some(expires_in) => now + expires_in.saturating_sub(EXPIRY_BUFFER),
            None => now + DEFAULT_LIFETIME,
        }
    }
}

/// A [`TokenProvider`] that refreshes its OAuth token whenever it has expired.
///
/// Clones share the token, so a refresh through one clone is seen by all of them.
#[derive(Debug, Clone)]
pub struct OAuthTokenProvider {
    token: Arc<Mutex<TimeBoundAccessToken>>,
    oauth_manager: Arc<OAuthManager>,
}

impl OAuthTokenProvider {
    pub fn new(token: TimeBoundAccessToken, oauth_manager: OAuthManager) -> Self {
        Self {
            token: Arc::new(Mutex::new(token)),
            oauth_manager: Arc::new(oauth_manager),
        }
    }

    /// Returns the current token response, for example to persist it.
    pub async fn token(&self) -> BasicTokenResponse {
        self.token.lock().await.token.clone()
    }
}

impl TokenProvider for OAuthTokenProvider {
    #[instrument(skip(self), level = tracing::Level::DEBUG)]
    async fn access_token(&self) -> eyre::Result<String> {
        let mut token = self.token.lock().await;

        if token.is_expired() {
            tracing::debug!("access token expired, attempting refresh");
            if !token.refresh(&self.oauth_manager).await? {
                tracing::error!("access token refresh failed, user must authorize again");
                eyre::bail!("unable to refresh expired access token");
            }
            tracing::debug!("access token successfully refreshed");
        }

        Ok(token.token.access_token().secret().to_string())
    }
}
