//! # Twitter client
//!
//! Implements [`PostFetcher`] on top of the Twitter/X API v2.
//!
//! Fetching the latest post of an account takes two requests:
//!
//! 1. `GET /2/users/by/username/{handle}` resolves the handle to a user id (cached for the
//!    lifetime of the client);
//! 2. `GET /2/users/{id}/tweets?max_results=5` returns the newest posts, newest first.
//!
//! Every failure is classified into a [`FetchError`] variant so the caller can log it and move on.
//!
//! ## Example
//!
//! ```rust,no_run
//! use relay_core::PostFetcher;
//! use twitter_client::TwitterClient;
//!
//! async fn example() -> Result<(), relay_core::FetchError> {
//!     let client = TwitterClient::new("bearer-token".to_string());
//!     if let Some(post) = client.fetch_latest("nasa").await? {
//!         println!("{}: {}", post.id(), post.text());
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use relay_core::{FetchError, Post, PostFetcher};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

const TWITTER_API_BASE: &str = "https://api.twitter.com";

/// Smallest page the timeline endpoint accepts.
const TIMELINE_PAGE_SIZE: u8 = 5;

/// Twitter/X API v2 client.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: Client,
    base_url: String,
    bearer_token: String,
    user_ids: Arc<RwLock<HashMap<String, String>>>,
}

#[derive(Debug, Deserialize)]
struct ApiProblem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserLookupResponse {
    data: Option<UserData>,
    #[serde(default)]
    errors: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    data: Vec<TweetData>,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
    text: String,
}

impl TwitterClient {
    /// Creates a client for the public API using the given bearer token.
    pub fn new(bearer_token: String) -> Self {
        Self::with_base_url(bearer_token, TWITTER_API_BASE.to_string())
    }

    /// Creates a client with a custom API base URL (e.g. a proxy or a mock server).
    pub fn with_base_url(bearer_token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
            user_ids: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a handle to a user id, using the cache when possible.
    async fn user_id(&self, account: &str) -> Result<String, FetchError> {
        if let Some(id) = self.user_ids.read().await.get(account) {
            return Ok(id.clone());
        }

        let url = self.endpoint(&["2", "users", "by", "username", account])?;
        let response: UserLookupResponse = self.get_json(url, account).await?;

        let id = match response.data {
            Some(user) => user.id,
            None => {
                let detail = response
                    .errors
                    .first()
                    .and_then(|p| p.detail.clone().or_else(|| p.title.clone()))
                    .unwrap_or_else(|| account.to_string());
                return Err(FetchError::NotFound(detail));
            }
        };

        debug!(account = %account, user_id = %id, "Resolved Twitter user id");
        self.user_ids
            .write()
            .await
            .insert(account.to_string(), id.clone());
        Ok(id)
    }

    /// `base_url` plus one percent-encoded path segment per element, so a handle can never add
    /// path segments, a query or a fragment to the request.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Network(format!("invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Network(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, account: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_secs = rate_limit_reset(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, account, body, retry_after_secs));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PostFetcher for TwitterClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_latest(&self, account: &str) -> Result<Option<Post>, FetchError> {
        let user_id = self.user_id(account).await?;
        let mut url = self.endpoint(&["2", "users", user_id.as_str(), "tweets"])?;
        url.query_pairs_mut()
            .append_pair("max_results", &TIMELINE_PAGE_SIZE.to_string());

        let timeline: TimelineResponse = match self.get_json(url, account).await {
            Ok(t) => t,
            Err(e @ FetchError::NotFound(_)) => {
                // Account deleted or renamed since the id was cached.
                self.user_ids.write().await.remove(account);
                warn!(account = %account, "Cached Twitter user id no longer valid");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let latest = timeline
            .data
            .into_iter()
            .next()
            .map(|t| Post::new(t.id, &decode_entities(&t.text)));

        match &latest {
            Some(post) => info!(account = %account, post_id = %post.id(), "Fetched latest post"),
            None => debug!(account = %account, "Account has no posts"),
        }
        Ok(latest)
    }
}

/// Maps a non-success HTTP status to the fetch error taxonomy.
fn classify_status(
    status: StatusCode,
    account: &str,
    body: String,
    retry_after_secs: Option<u64>,
) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound(account.to_string()),
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited { retry_after_secs },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized(body),
        _ => FetchError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

/// Seconds until the rate limit window resets, from `x-rate-limit-reset` (epoch seconds).
fn rate_limit_reset(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    let reset: u64 = headers
        .get("x-rate-limit-reset")?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
    Some(reset.saturating_sub(now))
}

/// The API returns text with `&amp;`, `&lt;` and `&gt;` escaped.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
