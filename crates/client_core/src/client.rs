use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Customer,
    protocol::{CustomersResponse, CUSTOMERS_ROUTE},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::FetchError;

/// Anything that can produce the full customer collection in one call.
#[async_trait]
pub trait CustomerSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Customer>, FetchError>;
}

pub struct CustomerClient {
    http: Client,
    base_url: Url,
}

impl CustomerClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn customers_url(&self) -> String {
        format!(
            "{}{CUSTOMERS_ROUTE}",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CustomerSource for CustomerClient {
    async fn fetch_all(&self) -> Result<Vec<Customer>, FetchError> {
        let url = self.customers_url();
        let response = self.http.get(&url).send().await.map_err(|err| {
            warn!(%url, error = %err, "customer request failed before a response arrived");
            FetchError::network()
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "server rejected customer request");
            return Err(FetchError::server(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body: CustomersResponse = response.json().await.map_err(|err| {
            warn!(%url, error = %err, "customer response body could not be decoded");
            FetchError::network()
        })?;
        debug!(count = body.customers.len(), "fetched customers");
        Ok(body.customers)
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
