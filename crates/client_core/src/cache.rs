use std::time::Duration;

use shared::domain::Customer;
use tokio::time::Instant;
use tracing::debug;

use crate::{
    client::CustomerSource,
    error::FetchError,
    retry::{fetch_with_retry, RetryPolicy},
};

pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    customers: Vec<Customer>,
    fetched_at: Instant,
}

/// Last successful customer fetch, reused while fresh.
pub struct QueryCache {
    stale_after: Duration,
    entry: Option<CacheEntry>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER)
    }
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entry: None,
        }
    }

    pub fn store(&mut self, customers: Vec<Customer>, now: Instant) {
        self.entry = Some(CacheEntry {
            customers,
            fetched_at: now,
        });
    }

    /// Cached data regardless of age.
    pub fn latest(&self) -> Option<&[Customer]> {
        self.entry.as_ref().map(|entry| entry.customers.as_slice())
    }

    pub fn fresh(&self, now: Instant) -> Option<&[Customer]> {
        self.entry
            .as_ref()
            .filter(|entry| now.saturating_duration_since(entry.fetched_at) < self.stale_after)
            .map(|entry| entry.customers.as_slice())
    }

    /// Returns fresh cached data unless `force` is set; otherwise fetches with
    /// retries and stores the result. A failed fetch leaves the old entry in place.
    pub async fn get_or_fetch(
        &mut self,
        source: &dyn CustomerSource,
        policy: RetryPolicy,
        force: bool,
    ) -> Result<Vec<Customer>, FetchError> {
        if !force {
            if let Some(customers) = self.fresh(Instant::now()) {
                debug!(count = customers.len(), "serving customers from cache");
                return Ok(customers.to_vec());
            }
        }

        let customers = fetch_with_retry(source, policy).await?;
        self.store(customers.clone(), Instant::now());
        Ok(customers)
    }
}
