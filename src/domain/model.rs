use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Product identifier as it arrives on the wire. Catalogs and carts disagree
/// on whether ids are numbers or strings, so comparison is always done on the
/// normalized string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProductRef(pub String);

impl ProductRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) => Ok(ProductRef(s)),
            serde_json::Value::Number(n) => Ok(ProductRef(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "product id must be a string or number, got {}",
                other
            ))),
        }
    }
}

/// Accepts a number, a numeric string, null, or garbage; anything that does
/// not parse becomes `None` so the resolver can apply its defaulting policy.
pub(crate) fn de_flex_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// One distinct product ordered in some quantity. Quantity and price are kept
/// loose here; coercion happens in the resolver, never upstream.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineItem {
    pub id: ProductRef,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub price: Option<f64>,
}

/// Physical attributes row from the product catalog. Every field is optional;
/// zero counts as absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductRecord {
    pub id: ProductRef,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub weight_g: Option<f64>,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub length_cm: Option<f64>,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub width_cm: Option<f64>,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub height_cm: Option<f64>,
}

/// Resolver output: one per line item, all attributes positive and final.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub product: ProductRef,
    pub quantity: u32,
    pub unit_weight_g: f64,
    pub unit_length_cm: f64,
    pub unit_width_cm: f64,
    pub unit_height_cm: f64,
    pub unit_price: f64,
}

/// Per-volume carrier ceiling. One fixed profile is shipped as the default;
/// the value travels explicitly so an alternate profile needs no code change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierLimits {
    pub max_weight_g: f64,
    pub max_footprint_cm: f64,
}

impl Default for CarrierLimits {
    fn default() -> Self {
        Self {
            max_weight_g: 30_000.0,
            max_footprint_cm: 100.0,
        }
    }
}

/// Substitute unit attributes for catalog misses and degenerate values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefaults {
    pub weight_g: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Default for UnitDefaults {
    fn default() -> Self {
        Self {
            weight_g: 1000.0,
            length_cm: 50.0,
            width_cm: 20.0,
            height_cm: 15.0,
        }
    }
}

/// Which post-processing the packer applies after the carve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackMode {
    /// Per-volume insurance value retained, no clamping.
    Quote,
    /// Sub-minimum dimensions clamped up for carrier acceptance; insurance
    /// is declared once for the whole shipment instead of per volume.
    Label,
}

/// One physical package handed to the carrier. Multiple purchased units fold
/// into weight and footprint; `quantity` on the wire is always 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "width")]
    pub width_cm: f64,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "length")]
    pub length_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_value: Option<f64>,
    pub quantity: u32,
}

/// Rate-quote request body: destination postal code plus the cart contents.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoteRequest {
    #[serde(alias = "destination_postal_code")]
    pub zip: String,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub options: Vec<RateOption>,
    /// Raw packed volumes, returned for diagnostics.
    pub debug: Vec<Volume>,
}

/// Carrier rate entry as returned by the calculate endpoint. Entries that
/// failed carry an `error` field instead of a price.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRateOption {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub delivery_time: Option<i64>,
    #[serde(default)]
    pub company: Option<RawCompany>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCompany {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Filtered rate entry exposed to the storefront client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateOption {
    pub id: Option<i64>,
    pub name: String,
    /// Price as the carrier reported it (usually a decimal string).
    pub price: serde_json::Value,
    pub delivery_time: Option<i64>,
    pub company: CompanyInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelRequest {
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelResponse {
    pub success: bool,
    pub label_url: Option<String>,
}

/// Order row with its embedded line items and receiver profile.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub shipping_cost: Option<f64>,
    pub shipping_method_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub label_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub profiles: Option<ReceiverProfile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderItem {
    pub product_id: ProductRef,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "de_flex_number")]
    pub price: Option<f64>,
}

impl OrderItem {
    /// Order items and cart items share the resolver, so an order item is
    /// viewed as a line item before resolution.
    pub fn as_line_item(&self) -> LineItem {
        LineItem {
            id: self.product_id.clone(),
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// Receiver profile columns (stored under their Portuguese names).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiverProfile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "cpf_cnpj")]
    pub document: Option<String>,
    #[serde(default, rename = "logradouro")]
    pub address: Option<String>,
    #[serde(default, rename = "numero")]
    pub number: Option<String>,
    #[serde(default, rename = "complemento")]
    pub complement: Option<String>,
    #[serde(default, rename = "bairro")]
    pub district: Option<String>,
    #[serde(default, rename = "cidade")]
    pub city: Option<String>,
    #[serde(default, rename = "uf")]
    pub state: Option<String>,
    #[serde(default, rename = "cep")]
    pub postal_code: Option<String>,
}

/// Postal endpoint of a rate calculation.
#[derive(Debug, Clone, Serialize)]
pub struct PostalEndpoint {
    pub postal_code: String,
}

/// Body of the carrier's rate-calculate call.
#[derive(Debug, Clone, Serialize)]
pub struct RateRequest {
    pub from: PostalEndpoint,
    pub to: PostalEndpoint,
    pub products: Vec<Volume>,
}

/// Sender or receiver block of a cart submission.
#[derive(Debug, Clone, Serialize)]
pub struct CartParty {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub document: String,
    pub address: String,
    pub number: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state_abbr: String,
    pub postal_code: String,
}

/// Declared content line of a cart submission (customs/invoice listing, not
/// a packing input).
#[derive(Debug, Clone, Serialize)]
pub struct DeclaredProduct {
    pub name: String,
    pub quantity: u32,
    pub unitary_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartOptions {
    pub insurance_value: f64,
    pub receipt: bool,
    pub own_hand: bool,
}

/// Full cart submission driving label creation.
#[derive(Debug, Clone, Serialize)]
pub struct CartPayload {
    pub service: i64,
    pub from: CartParty,
    pub to: CartParty,
    pub products: Vec<DeclaredProduct>,
    pub volumes: Vec<Volume>,
    pub options: CartOptions,
}
