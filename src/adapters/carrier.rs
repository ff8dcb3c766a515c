use crate::domain::model::{CartPayload, RateRequest, RawRateOption};
use crate::domain::ports::CarrierApi;
use crate::utils::error::{Result, ShipError};
use async_trait::async_trait;
use reqwest::Client;

pub const PRODUCTION_BASE_URL: &str = "https://www.melhorenvio.com.br";
pub const SANDBOX_BASE_URL: &str = "https://sandbox.melhorenvio.com.br";

const USER_AGENT: &str = "ship-split";

/// Carrier client: rate calculation plus the cart/checkout/generate/print
/// label sequence. Every call is single-attempt; a non-success response
/// surfaces the carrier's own message.
#[derive(Debug, Clone)]
pub struct HttpCarrier {
    base_url: String,
    token: String,
    client: Client,
}

impl HttpCarrier {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    pub fn for_environment(sandbox: bool, token: impl Into<String>) -> Self {
        let base = if sandbox {
            SANDBOX_BASE_URL
        } else {
            PRODUCTION_BASE_URL
        };
        Self::new(base, token)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
    }
}

/// Pulls the carrier's `message` field out of a failed response, falling
/// back to the HTTP status line.
async fn carrier_error(response: reqwest::Response) -> ShipError {
    let status = response.status();
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status)),
        Err(_) => format!("HTTP {}", status),
    };
    ShipError::CarrierError { message }
}

#[async_trait]
impl CarrierApi for HttpCarrier {
    async fn calculate(&self, request: &RateRequest) -> Result<Vec<RawRateOption>> {
        tracing::debug!(
            "Calculating rates for {} volume(s) to {}",
            request.products.len(),
            request.to.postal_code
        );
        let response = self
            .post("/api/v2/me/shipment/calculate")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(carrier_error(response).await);
        }

        // The endpoint answers with an array of options; anything else
        // (an error object that still came back 200) counts as no options.
        let body: serde_json::Value = response.json().await?;
        match body {
            serde_json::Value::Array(_) => Ok(serde_json::from_value(body)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn add_to_cart(&self, payload: &CartPayload) -> Result<String> {
        let response = self.post("/api/v2/me/cart").json(payload).send().await?;

        if !response.status().is_success() {
            return Err(carrier_error(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        body.get("id")
            .and_then(|id| match id {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .ok_or_else(|| ShipError::CarrierError {
                message: "Cart response carried no shipment id".to_string(),
            })
    }

    async fn checkout(&self, shipment_id: &str) -> Result<()> {
        let response = self
            .post("/api/v2/me/shipment/checkout")
            .json(&serde_json::json!({ "orders": [shipment_id] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(carrier_error(response).await);
        }
        Ok(())
    }

    async fn generate(&self, shipment_id: &str) -> Result<()> {
        // Generation is fire-and-forget: the label is fetched via print.
        self.post("/api/v2/me/shipment/generate")
            .json(&serde_json::json!({ "orders": [shipment_id] }))
            .send()
            .await?;
        Ok(())
    }

    async fn print_label(&self, shipment_id: &str) -> Result<Option<String>> {
        let response = self
            .post("/api/v2/me/shipment/print")
            .json(&serde_json::json!({ "mode": "pdf", "orders": [shipment_id] }))
            .send()
            .await?;

        let body: serde_json::Value = response.json().await?;
        Ok(body
            .get("url")
            .and_then(|u| u.as_str())
            .map(str::to_string))
    }
}
