use crate::domain::model::{ProductRecord, ProductRef};
use crate::domain::ports::ProductCatalog;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Product catalog backed by a PostgREST-style store
/// (`GET /rest/v1/products?id=in.(...)`).
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    service_key: String,
    client: Client,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    async fn products_by_ids(&self, ids: &[ProductRef]) -> Result<Vec<ProductRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_list = ids
            .iter()
            .map(ProductRef::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/rest/v1/products?id=in.({})", self.base_url, id_list);
        tracing::debug!("Fetching {} product records", ids.len());

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
