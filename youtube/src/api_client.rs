//! Generic client for Google REST APIs.
//!
//! [`ApiClient`] sends exactly one HTTP request per call and resolves it to the deserialized JSON
//! response body, or to an [`Error`] describing why the exchange failed. Requests are either
//! authorized by the API key (sent as the `key` query parameter) or by a user's OAuth2 token
//! (sent as an `Authorization: Bearer` header), never both.

use crate::config::ApiClientConfig;
use crate::error::{Error, Result};
use crate::token::{NoToken, TokenProvider};
use http::{Method, StatusCode};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::instrument;

/// Separator of query parameter pairs within a query string.
const QUERY_PARAMETERS_SEPARATOR: char = '&';

/// Bytes escaped in query parameter names and values: everything except ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )`, matching JavaScript's `encodeURIComponent`. A space becomes `%20`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for one service of the Google REST API.
///
/// Cloning is cheap: clones share the HTTP connection pool, the token provider and the abort
/// state.
pub struct ApiClient<P = NoToken> {
    config: Arc<ApiClientConfig>,
    service_url: Arc<str>,
    token_provider: Arc<P>,
    http: reqwest::Client,
    aborted: Arc<watch::Sender<bool>>,
}

impl<P> Clone for ApiClient<P> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            service_url: Arc::clone(&self.service_url),
            token_provider: Arc::clone(&self.token_provider),
            http: self.http.clone(),
            aborted: Arc::clone(&self.aborted),
        }
    }
}

impl<P> fmt::Debug for ApiClient<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("service_url", &self.service_url)
            .field("timeout", &self.config.timeout)
            .field("aborted", &*self.aborted.borrow())
            .finish_non_exhaustive()
    }
}

/// Cancels the requests of an [`ApiClient`].
///
/// Aborting is permanent: requests in flight resolve to [`Error::Aborted`], and so does every
/// request made through the client (or its clones) afterwards.
#[derive(Debug, Clone)]
pub struct AbortHandle(Arc<watch::Sender<bool>>);

impl AbortHandle {
    pub fn abort(&self) {
        tracing::debug!("aborting API client requests");
        self.0.send_replace(true);
    }

    pub fn is_aborted(&self) -> bool {
        *self.0.borrow()
    }
}

impl<P: TokenProvider> ApiClient<P> {
    /// Creates a client with its own HTTP connection pool.
    pub fn new(config: ApiClientConfig, token_provider: P) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("build HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, token_provider, http))
    }

    /// Creates a client sharing an existing HTTP client.
    ///
    /// The configured timeout is still applied to every request.
    pub fn with_http_client(
        config: ApiClientConfig,
        token_provider: P,
        http: reqwest::Client,
    ) -> Self {
        let (aborted, _) = watch::channel(false);
        Self {
            service_url: config.service_url().into(),
            config: Arc::new(config),
            token_provider: Arc::new(token_provider),
            http,
            aborted: Arc::new(aborted),
        }
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    pub fn token_provider(&self) -> &P {
        &self.token_provider
    }

    /// Returns a handle that cancels the requests of this client and all of its clones.
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle(Arc::clone(&self.aborted))
    }

    /// Retrieves the entity or entities at `path` matching `parameters`.
    ///
    /// The parameters are sent as the query string, in order.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        parameters: &[(&str, &str)],
        authorized: bool,
    ) -> Result<T> {
        self.send_request(Method::GET, path, parameters, None::<&()>, authorized)
            .await
    }

    /// Creates a new entity at `path`, sending `data` as the JSON request body.
    pub async fn insert<T, B>(&self, path: &str, data: &B, authorized: bool) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_request(Method::POST, path, &[], Some(data), authorized)
            .await
    }

    /// Updates the entity at `path`, sending `data` as the JSON request body.
    pub async fn update<T, B>(&self, path: &str, data: &B, authorized: bool) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_request(Method::PUT, path, &[], Some(data), authorized)
            .await
    }

    /// Deletes the entity at `path`. The parameters are sent as the query string.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        parameters: &[(&str, &str)],
        authorized: bool,
    ) -> Result<T> {
        self.send_request(Method::DELETE, path, parameters, None::<&()>, authorized)
            .await
    }

    /// Performs one HTTP exchange and classifies its outcome.
    ///
    /// Only a `200 OK` response with a body deserializable into `T` succeeds.
    #[instrument(skip(self, parameters, body), level = tracing::Level::DEBUG)]
    async fn send_request<T, B>(
        &self,
        method: Method,
        path: &str,
        parameters: &[(&str, &str)],
        body: Option<&B>,
        authorized: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.request_url(path, parameters, authorized);
        let abort_signal = self.aborted.subscribe();
        if *abort_signal.borrow() {
            return Err(Error::Aborted { method, url });
        }

        // aborting also interrupts token acquisition
        let exchange = async {
            let mut request = self
                .http
                .request(method.clone(), &url)
                .timeout(self.config.timeout);

            if authorized {
                let access_token = self
                    .token_provider
                    .access_token()
                    .await
                    .map_err(Error::auth)?;
                request = request.header("Authorization", format!("Bearer {}", access_token));
            }

            if let Some(body) = body {
                request = request
                    .header("Content-Type", "application/json")
                    .json(body);
            }

            let transport = |e: reqwest::Error| {
                Error::transport(method.clone(), url.clone(), self.config.timeout, e)
            };
            let response = request.send().await.map_err(&transport)?;
            let status = response.status();
            let text = response.text().await.map_err(&transport)?;
            Ok::<_, Error>((status, text))
        };

        let outcome = tokio::select! {
            biased;
            () = aborted(abort_signal) => None,
            outcome = exchange => Some(outcome),
        };
        let (status, text) = match outcome {
            None => {
                tracing::debug!(%method, %url, "request aborted");
                return Err(Error::Aborted { method, url });
            }
            Some(Err(e)) => {
                tracing::warn!(%method, %url, error = %e, "request failed");
                return Err(e);
            }
            Some(Ok(exchange)) => exchange,
        };

        if status != StatusCode::OK {
            tracing::warn!(%method, %url, %status, "Google API rejected the request");
            return Err(Error::Api {
                method,
                url,
                status,
                body: text,
            });
        }

        match serde_json::from_str(&text) {
            Ok(parsed) => {
                tracing::debug!(%method, %url, bytes = text.len(), "request succeeded");
                Ok(parsed)
            }
            Err(source) => Err(Error::BodyParse {
                method,
                url,
                body: text,
                source,
            }),
        }
    }

    /// Builds the absolute URL of a request.
    ///
    /// The API key is only included when the request isn't authorized by a user.
    fn request_url(&self, path: &str, parameters: &[(&str, &str)], authorized: bool) -> String {
        let mut url = format!("{}{}", self.service_url, path);
        let mut separator = if url.contains('?') {
            QUERY_PARAMETERS_SEPARATOR
        } else {
            '?'
        };

        if !authorized {
            url.push(separator);
            url.push_str("key=");
            url.extend(utf8_percent_encode(&self.config.api_key, QUERY_COMPONENT));
            separator = QUERY_PARAMETERS_SEPARATOR;
        }

        if !parameters.is_empty() {
            url.push(separator);
            url.push_str(&encode_query(parameters));
        }

        url
    }
}

/// Resolves once the client has been aborted.
async fn aborted(mut signal: watch::Receiver<bool>) {
    loop {
        if *signal.borrow_and_update() {
            return;
        }
        if signal.changed().await.is_err() {
            // every handle is gone, so nothing can abort anymore
            std::future::pending::<()>().await;
        }
    }
}

/// Encodes parameters into a query string, without a leading `?`.
///
/// Pairs keep their order; names and values are percent-encoded independently.
pub fn encode_query(parameters: &[(&str, &str)]) -> String {
    let mut query = String::new();
    for (i, (name, value)) in parameters.iter().enumerate() {
        if i > 0 {
            query.push(QUERY_PARAMETERS_SEPARATOR);
        }
        query.extend(utf8_percent_encode(name, QUERY_COMPONENT));
        query.push('=');
        query.extend(utf8_percent_encode(value, QUERY_COMPONENT));
    }
    query
}
