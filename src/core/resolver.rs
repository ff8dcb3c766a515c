use crate::domain::model::{LineItem, ProductRecord, ProductRef, ResolvedItem, UnitDefaults};

/// Resolves per-unit physical attributes for each line item from the catalog,
/// substituting defaults for misses and degenerate values. Never fails:
/// defaulting is the designed degradation path.
pub fn resolve(
    items: &[LineItem],
    catalog: &[ProductRecord],
    defaults: &UnitDefaults,
) -> Vec<ResolvedItem> {
    items
        .iter()
        .map(|item| {
            let record = catalog.iter().find(|p| p.id == item.id);
            ResolvedItem {
                product: item.id.clone(),
                quantity: coerce_quantity(item.quantity),
                unit_weight_g: positive_or(record.and_then(|r| r.weight_g), defaults.weight_g),
                unit_length_cm: positive_or(record.and_then(|r| r.length_cm), defaults.length_cm),
                unit_width_cm: positive_or(record.and_then(|r| r.width_cm), defaults.width_cm),
                unit_height_cm: positive_or(record.and_then(|r| r.height_cm), defaults.height_cm),
                unit_price: item
                    .price
                    .filter(|p| p.is_finite() && *p >= 0.0)
                    .unwrap_or(0.0),
            }
        })
        .collect()
}

/// Distinct product ids in first-seen order, for the catalog lookup.
pub fn distinct_ids(items: &[LineItem]) -> Vec<ProductRef> {
    let mut ids: Vec<ProductRef> = Vec::new();
    for item in items {
        if !ids.contains(&item.id) {
            ids.push(item.id.clone());
        }
    }
    ids
}

pub(crate) fn coerce_quantity(quantity: Option<f64>) -> u32 {
    match quantity {
        Some(q) if q.is_finite() && q >= 1.0 => q.floor() as u32,
        _ => 1,
    }
}

/// Zero, negative, NaN and infinity all collapse to the default. A zero
/// dimension must never reach the packer.
fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}
