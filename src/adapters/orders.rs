use crate::domain::model::OrderRecord;
use crate::domain::ports::OrderStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Order storage backed by the same PostgREST-style store as the catalog.
/// A single fetch embeds the order items and the receiver profile.
#[derive(Debug, Clone)]
pub struct HttpOrderStore {
    base_url: String,
    service_key: String,
    client: Client,
}

impl HttpOrderStore {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl OrderStore for HttpOrderStore {
    async fn fetch_order(&self, order_id: &str) -> Result<Option<OrderRecord>> {
        let url = format!(
            "{}/rest/v1/orders?id=eq.{}&select=*,order_items(*),profiles(*)",
            self.base_url, order_id
        );
        tracing::debug!("Fetching order {}", order_id);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?
            .error_for_status()?;

        let orders: Vec<OrderRecord> = response.json().await?;
        Ok(orders.into_iter().next())
    }

    async fn mark_shipped(&self, order_id: &str, label_url: Option<&str>) -> Result<()> {
        let url = format!("{}/rest/v1/orders?id=eq.{}", self.base_url, order_id);
        tracing::debug!("Marking order {} as shipped", order_id);

        self.client
            .patch(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({
                "status": "enviado",
                "label_url": label_url,
            }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
