use crate::config::StoreProfile;
use crate::core::{packer, resolver};
use crate::domain::model::{
    CarrierLimits, CartOptions, CartParty, CartPayload, DeclaredProduct, LabelRequest,
    LabelResponse, LineItem, OrderItem, PackMode, ReceiverProfile, UnitDefaults,
};
use crate::domain::ports::{CarrierApi, OrderStore, ProductCatalog, ShippingConfig};
use crate::utils::error::{Result, ShipError};
use crate::utils::validation::only_digits;

/// Label-generation operation: pack the order into volumes, declare the
/// shipment-level insurance and drive the carrier's cart -> checkout ->
/// generate -> print sequence, persisting the result on the order.
pub struct LabelService<O, Cat, Car, Cfg> {
    orders: O,
    catalog: Cat,
    carrier: Car,
    config: Cfg,
    store: StoreProfile,
    limits: CarrierLimits,
    defaults: UnitDefaults,
}

impl<O, Cat, Car, Cfg> LabelService<O, Cat, Car, Cfg>
where
    O: OrderStore,
    Cat: ProductCatalog,
    Car: CarrierApi,
    Cfg: ShippingConfig,
{
    pub fn new(orders: O, catalog: Cat, carrier: Car, config: Cfg, store: StoreProfile) -> Self {
        Self {
            orders,
            catalog,
            carrier,
            config,
            store,
            limits: CarrierLimits::default(),
            defaults: UnitDefaults::default(),
        }
    }

    pub fn with_policy(mut self, limits: CarrierLimits, defaults: UnitDefaults) -> Self {
        self.limits = limits;
        self.defaults = defaults;
        self
    }

    pub async fn handle(&self, request: &LabelRequest) -> Result<LabelResponse> {
        // Not-found short-circuits before any packing runs.
        let order = self
            .orders
            .fetch_order(&request.order_id)
            .await?
            .ok_or_else(|| ShipError::NotFound {
                entity: "Order",
                id: request.order_id.clone(),
            })?;
        tracing::info!(
            "Generating label for order {} ({} item(s))",
            order.id,
            order.order_items.len()
        );

        let service = order
            .shipping_method_id
            .ok_or_else(|| ShipError::InvalidOrder {
                id: order.id.clone(),
                reason: "no shipping method selected".to_string(),
            })?;

        let line_items: Vec<LineItem> = order
            .order_items
            .iter()
            .map(OrderItem::as_line_item)
            .collect();
        let ids = resolver::distinct_ids(&line_items);
        let catalog = self.catalog.products_by_ids(&ids).await?;
        let resolved = resolver::resolve(&line_items, &catalog, &self.defaults);
        let volumes = packer::pack(&resolved, &self.limits, PackMode::Label);
        tracing::debug!("Packed order into {} volume(s)", volumes.len());

        // Shipment-level insurance: order value net of shipping, capped.
        let order_value =
            order.total_amount.unwrap_or(0.0) - order.shipping_cost.unwrap_or(0.0);
        let insurance_value = order_value.min(self.config.insurance_cap());

        let receiver = order.profiles.clone().unwrap_or_default();
        let payload = CartPayload {
            service,
            from: self.store.sender_party(self.config.origin_postal_code()),
            to: receiver_party(&receiver),
            products: declared_products(&order.order_items),
            volumes,
            options: CartOptions {
                insurance_value,
                receipt: false,
                own_hand: false,
            },
        };

        let shipment_id = self.carrier.add_to_cart(&payload).await?;
        tracing::debug!("Carrier shipment id: {}", shipment_id);
        self.carrier.checkout(&shipment_id).await?;
        self.carrier.generate(&shipment_id).await?;
        let label_url = self.carrier.print_label(&shipment_id).await?;

        self.orders
            .mark_shipped(&order.id, label_url.as_deref())
            .await?;
        tracing::info!("Order {} marked as shipped", order.id);

        Ok(LabelResponse {
            success: true,
            label_url,
        })
    }
}

fn receiver_party(profile: &ReceiverProfile) -> CartParty {
    CartParty {
        name: profile
            .full_name
            .clone()
            .unwrap_or_else(|| "Customer".to_string()),
        phone: only_digits(profile.phone.as_deref().unwrap_or("")),
        email: profile
            .email
            .clone()
            .unwrap_or_else(|| "unknown@example.com".to_string()),
        document: only_digits(profile.document.as_deref().unwrap_or("")),
        address: profile.address.clone().unwrap_or_default(),
        number: profile.number.clone().unwrap_or_default(),
        complement: profile.complement.clone().unwrap_or_default(),
        district: profile.district.clone().unwrap_or_default(),
        city: profile.city.clone().unwrap_or_default(),
        state_abbr: profile.state.clone().unwrap_or_default(),
        postal_code: only_digits(profile.postal_code.as_deref().unwrap_or("")),
    }
}

/// Declared content listing for the carrier invoice. Quantities stay as
/// purchased counts here; packing does not apply.
fn declared_products(items: &[OrderItem]) -> Vec<DeclaredProduct> {
    items
        .iter()
        .map(|item| DeclaredProduct {
            name: item.name.clone().unwrap_or_else(|| "Item".to_string()),
            quantity: item
                .quantity
                .filter(|q| q.is_finite() && *q >= 1.0)
                .map(|q| q.floor() as u32)
                .unwrap_or(1),
            unitary_value: item.price.unwrap_or(0.0),
        })
        .collect()
}
