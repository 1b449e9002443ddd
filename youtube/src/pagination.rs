//! Aggregation of paginated list endpoints.
//!
//! Google list endpoints return one page of `items` at a time, along with a `nextPageToken`
//! whenever more results exist. Pages have to be fetched one after another since each request
//! needs the token of the previous response.

use crate::api_client::ApiClient;
use crate::error::Result;
use crate::token::TokenProvider;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_stream::Stream;
use tracing::instrument;

/// One page of a list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The resources on this page. Missing when the page is empty.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Value for the `pageToken` parameter of the request for the following page.
    pub next_page_token: Option<String>,
    pub page_info: Option<PageInfo>,
}

/// Result counts a list response reports about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Size of the whole result set. Google documents it as an approximation.
    pub total_results: u32,
    pub results_per_page: u32,
}

impl<P: TokenProvider> ApiClient<P> {
    /// Fetches a single page of a list endpoint.
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        parameters: &[(&str, &str)],
        page_token: Option<&str>,
        authorized: bool,
    ) -> Result<Page<T>> {
        match page_token {
            None => self.list(path, parameters, authorized).await,
            Some(page_token) => {
                let mut parameters = parameters.to_vec();
                parameters.push(("pageToken", page_token));
                self.list(path, &parameters, authorized).await
            }
        }
    }

    /// Fetches the pages of a list endpoint and concatenates their items.
    ///
    /// After every page that carries a `nextPageToken`, `should_continue` is asked whether to
    /// fetch another one; it is passed the items of the page that was just fetched. A page
    /// without a `nextPageToken` ends the listing regardless.
    ///
    /// Items are returned in the order the server listed them. If any request fails, the items
    /// fetched so far are discarded and the error is returned.
    #[instrument(skip(self, parameters, should_continue), level = tracing::Level::DEBUG)]
    pub async fn list_all<T, F>(
        &self,
        path: &str,
        parameters: &[(&str, &str)],
        mut should_continue: F,
        authorized: bool,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: FnMut(&[T]) -> bool,
    {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page: Page<T> = self
                .list_page(path, parameters, page_token.as_deref(), authorized)
                .await?;
            pages += 1;

            let fetched_from = items.len();
            items.extend(page.items);

            page_token = match page.next_page_token {
                Some(next) if should_continue(&items[fetched_from..]) => Some(next),
                Some(_) => {
                    tracing::debug!(pages, "stopping listing early on caller's request");
                    break;
                }
                None => break,
            };
        }

        tracing::debug!(pages, items = items.len(), "fetched all pages");
        Ok(items)
    }

    /// Returns a stream over the items of every page of a list endpoint.
    ///
    /// A page is only requested once the items of the previous page have been consumed, so
    /// dropping the stream stops the listing. The stream ends after yielding an error.
    pub fn stream_all<'a, T>(
        &'a self,
        path: &'a str,
        parameters: Vec<(&'a str, &'a str)>,
        authorized: bool,
    ) -> impl Stream<Item = Result<T>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        async_stream::try_stream! {
            let mut page_token: Option<String> = None;
            loop {
                let page: Page<T> = self
                    .list_page(path, &parameters, page_token.as_deref(), authorized)
                    .await?;
                for item in page.items {
                    yield item;
                }
                match page.next_page_token {
                    Some(next) => page_token = Some(next),
                    None => break,
                }
            }
        }
    }
}
