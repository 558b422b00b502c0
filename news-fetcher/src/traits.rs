use crate::types::{NewsItem, Result};
use async_trait::async_trait;

/// Persistence for news items, keyed by guid.
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Create the backing table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<()>;

    /// Insert every item, replacing any stored item with the same guid.
    ///
    /// The batch is written atomically: on error nothing is stored.
    async fn upsert(&self, items: &[NewsItem]) -> Result<usize>;

    /// Items whose title contains `term`, most recently inserted first.
    /// An empty term matches everything.
    async fn search(&self, term: &str) -> Result<Vec<NewsItem>>;
}
