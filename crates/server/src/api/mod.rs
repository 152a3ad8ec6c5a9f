use std::{collections::HashSet, fs, path::Path, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use shared::{
    domain::Customer,
    error::ErrorBody,
    protocol::{CustomersResponse, HealthResponse},
};
use tracing::error;

const SEED_CUSTOMERS: &str = include_str!("../data/customers.json");
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch customers";

/// Source of the customer collection served by `/api/customers`.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn all_customers(&self) -> anyhow::Result<Vec<Customer>>;
}

/// Fixed collection loaded once at startup and never modified.
pub struct StaticDirectory {
    customers: Arc<Vec<Customer>>,
}

impl StaticDirectory {
    pub fn new(customers: Vec<Customer>) -> anyhow::Result<Self> {
        let mut seen = HashSet::with_capacity(customers.len());
        for customer in &customers {
            if !seen.insert(customer.id.as_str()) {
                bail!("duplicate customer id '{}'", customer.id);
            }
        }

        Ok(Self {
            customers: Arc::new(customers),
        })
    }

    pub fn from_seed() -> anyhow::Result<Self> {
        Self::from_json(SEED_CUSTOMERS).context("built-in customer data is invalid")
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let customers: Vec<Customer> =
            serde_json::from_str(raw).context("failed to parse customer list")?;
        Self::new(customers)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read customers from '{}'", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid customer file '{}'", path.display()))
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }
}

#[async_trait]
impl CustomerDirectory for StaticDirectory {
    async fn all_customers(&self) -> anyhow::Result<Vec<Customer>> {
        Ok(self.customers.as_ref().clone())
    }
}

#[derive(Clone)]
pub struct ApiContext {
    pub directory: Arc<dyn CustomerDirectory>,
    /// Artificial latency applied before answering `/api/customers`.
    pub response_delay: Duration,
}

pub async fn list_customers(ctx: &ApiContext) -> Result<CustomersResponse, ErrorBody> {
    if !ctx.response_delay.is_zero() {
        tokio::time::sleep(ctx.response_delay).await;
    }

    let customers = ctx.directory.all_customers().await.map_err(|err| {
        error!(error = %err, "customer directory failed");
        ErrorBody::new(FETCH_FAILED_MESSAGE)
    })?;

    Ok(CustomersResponse { customers })
}

pub fn health_report(now: DateTime<Utc>) -> HealthResponse {
    HealthResponse {
        status: "OK".to_string(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
