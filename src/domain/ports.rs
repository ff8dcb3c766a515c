use crate::domain::model::{
    CartPayload, OrderRecord, ProductRecord, ProductRef, RateRequest, RawRateOption,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Product catalog lookup. A miss for any individual id is not an error;
/// defaults cover the gap downstream.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn products_by_ids(&self, ids: &[ProductRef]) -> Result<Vec<ProductRecord>>;
}

/// Order storage. Fetch brings the order row with its embedded line items
/// and receiver profile in one call.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn fetch_order(&self, order_id: &str) -> Result<Option<OrderRecord>>;
    async fn mark_shipped(&self, order_id: &str, label_url: Option<&str>) -> Result<()>;
}

/// Carrier API surface: rate calculation plus the four-step label sequence.
/// All calls are single-attempt; failures surface the carrier's own message.
#[async_trait]
pub trait CarrierApi: Send + Sync {
    async fn calculate(&self, request: &RateRequest) -> Result<Vec<RawRateOption>>;

    /// Submits a cart entry and returns the carrier-side shipment id.
    async fn add_to_cart(&self, payload: &CartPayload) -> Result<String>;
    async fn checkout(&self, shipment_id: &str) -> Result<()>;
    async fn generate(&self, shipment_id: &str) -> Result<()>;

    /// Requests the printable label document; returns its URL when the
    /// carrier has one ready.
    async fn print_label(&self, shipment_id: &str) -> Result<Option<String>>;
}

/// Read-only view of the shipping-relevant configuration, so services can be
/// exercised against a mock config in tests.
pub trait ShippingConfig: Send + Sync {
    fn origin_postal_code(&self) -> &str;
    /// Rate options whose lowercased name contains this keyword are dropped.
    fn excluded_service_keyword(&self) -> &str;
    /// Ceiling for the declared shipment insurance value in label mode.
    fn insurance_cap(&self) -> f64;
}
