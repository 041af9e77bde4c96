//! Content retrieval abstraction. twitter-client provides the production implementation.

use crate::error::FetchError;
use crate::types::Post;
use async_trait::async_trait;

/// Retrieves the most recent post of an account.
#[async_trait]
pub trait PostFetcher: Send + Sync {
    /// Returns the newest post of `account`, or None when the account has no posts.
    async fn fetch_latest(&self, account: &str) -> Result<Option<Post>, FetchError>;
}
