use crate::core::{packer, resolver};
use crate::domain::model::{
    CarrierLimits, CompanyInfo, PackMode, PostalEndpoint, QuoteRequest, QuoteResponse, RateOption,
    RateRequest, RawRateOption, UnitDefaults,
};
use crate::domain::ports::{CarrierApi, ProductCatalog, ShippingConfig};
use crate::utils::error::Result;

/// Rate-quote operation: resolve the cart against the catalog, pack it into
/// volumes and ask the carrier for delivery options.
pub struct QuoteService<Cat, Car, Cfg> {
    catalog: Cat,
    carrier: Car,
    config: Cfg,
    limits: CarrierLimits,
    defaults: UnitDefaults,
}

impl<Cat, Car, Cfg> QuoteService<Cat, Car, Cfg>
where
    Cat: ProductCatalog,
    Car: CarrierApi,
    Cfg: ShippingConfig,
{
    pub fn new(catalog: Cat, carrier: Car, config: Cfg) -> Self {
        Self {
            catalog,
            carrier,
            config,
            limits: CarrierLimits::default(),
            defaults: UnitDefaults::default(),
        }
    }

    /// Substitute an alternate carrier policy (limits and defaulting).
    pub fn with_policy(mut self, limits: CarrierLimits, defaults: UnitDefaults) -> Self {
        self.limits = limits;
        self.defaults = defaults;
        self
    }

    pub async fn handle(&self, request: &QuoteRequest) -> Result<QuoteResponse> {
        tracing::info!(
            "Quoting shipping to {} for {} item(s)",
            request.zip,
            request.items.len()
        );

        let ids = resolver::distinct_ids(&request.items);
        let catalog = self.catalog.products_by_ids(&ids).await?;
        let resolved = resolver::resolve(&request.items, &catalog, &self.defaults);
        let volumes = packer::pack(&resolved, &self.limits, PackMode::Quote);
        tracing::debug!("Packed {} item(s) into {} volume(s)", resolved.len(), volumes.len());

        let rate_request = RateRequest {
            from: PostalEndpoint {
                postal_code: self.config.origin_postal_code().to_string(),
            },
            to: PostalEndpoint {
                postal_code: request.zip.clone(),
            },
            products: volumes.clone(),
        };
        let raw = self.carrier.calculate(&rate_request).await?;

        let options = filter_and_sort(raw, self.config.excluded_service_keyword());
        tracing::info!("{} delivery option(s) after filtering", options.len());

        Ok(QuoteResponse {
            options,
            debug: volumes,
        })
    }
}

/// Drops failed entries and excluded delivery categories, then sorts the
/// survivors ascending by numeric price. Prices arrive as decimal strings,
/// so the comparison parses rather than sorting lexically.
fn filter_and_sort(raw: Vec<RawRateOption>, excluded_keyword: &str) -> Vec<RateOption> {
    let excluded = excluded_keyword.to_lowercase();

    let mut options: Vec<RateOption> = raw
        .into_iter()
        .filter(|opt| opt.error.is_none())
        .filter_map(|opt| {
            let name = opt.name?;
            if !excluded.is_empty() && name.to_lowercase().contains(&excluded) {
                return None;
            }
            Some(RateOption {
                id: opt.id,
                name,
                price: opt.price.unwrap_or(serde_json::Value::Null),
                delivery_time: opt.delivery_time,
                company: CompanyInfo {
                    name: opt.company.as_ref().and_then(|c| c.name.clone()),
                    picture: opt.company.as_ref().and_then(|c| c.picture.clone()),
                },
            })
        })
        .collect();

    options.sort_by(|a, b| numeric_price(&a.price).total_cmp(&numeric_price(&b.price)));
    options
}

fn numeric_price(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::INFINITY),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(f64::INFINITY),
        _ => f64::INFINITY,
    }
}
