use crate::aligner::assemble_values;
use crate::fetcher::Fetcher;
use crate::parser::CompiledRule;
use crate::traits::NewsRepository;
use crate::types::{FieldValues, ParsingRule, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Fetch, extract, align and store, in that order.
///
/// Each stage runs only if the previous one succeeded, so the store is
/// either updated with the whole batch or not touched at all.
pub struct IngestionPipeline {
    fetcher: Fetcher,
    store: Arc<dyn NewsRepository>,
}

impl IngestionPipeline {
    pub fn new(fetcher: Fetcher, store: Arc<dyn NewsRepository>) -> Self {
        Self { fetcher, store }
    }

    /// Ingests the feed at `url`, returning how many items were stored.
    pub async fn run(&self, url: &str, rule: &ParsingRule) -> Result<usize> {
        info!("Fetching feed from {} with the parsing rule: {}", url, rule);
        let body = self.fetcher.fetch(url).await?;
        self.ingest_bytes(&body, rule).await
    }

    /// Same as [`run`](Self::run) on a raw body that is already in memory,
    /// decoded per its XML declaration.
    pub async fn ingest_bytes(&self, body: &[u8], rule: &ParsingRule) -> Result<usize> {
        let compiled = CompiledRule::compile(rule)?;
        let values = compiled.extract_bytes(body)?;
        self.store_values(values).await
    }

    /// Same as [`run`](Self::run) on a document that is already decoded.
    pub async fn ingest(&self, document: &str, rule: &ParsingRule) -> Result<usize> {
        let compiled = CompiledRule::compile(rule)?;
        let values = compiled.extract(document)?;
        self.store_values(values).await
    }

    async fn store_values(&self, values: FieldValues) -> Result<usize> {
        debug!(
            "Extracted {} guids, {} titles, {} dates, {} links",
            values.guids.len(),
            values.titles.len(),
            values.dates.len(),
            values.links.len()
        );

        let items = assemble_values(values)?;
        let stored = self.store.upsert(&items).await?;

        info!("Stored {} news items", stored);
        Ok(stored)
    }
}
