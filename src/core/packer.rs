use crate::domain::model::{CarrierLimits, PackMode, ResolvedItem, Volume};

/// Carrier label creation rejects sub-minimum volumes, so label mode clamps
/// up to these floors.
pub const LABEL_MIN_WIDTH_CM: f64 = 15.0;
pub const LABEL_MIN_HEIGHT_CM: f64 = 2.0;
pub const LABEL_MIN_LENGTH_CM: f64 = 15.0;
pub const LABEL_MIN_WEIGHT_KG: f64 = 0.1;

/// Splits resolved items into carrier-compliant volumes.
///
/// Greedy square-footprint heuristic: for each item the binding constraint
/// (footprint capacity or weight capacity) fixes the units per volume, then
/// full volumes are carved off until the quantity is exhausted, arranging
/// each volume's units as close to a square as the per-row capacity allows.
/// Not optimal across the whole order (units of different products are never
/// mixed, and alternate width/height splits are never considered), but
/// deterministic and O(total units). Downstream carrier pricing assumes this
/// exact shape.
///
/// Volumes come out in item order, carve order within an item.
pub fn pack(items: &[ResolvedItem], limits: &CarrierLimits, mode: PackMode) -> Vec<Volume> {
    let mut volumes = carve(items, limits);
    if mode == PackMode::Label {
        for volume in &mut volumes {
            // Insurance is declared once for the whole shipment in label
            // mode, not per volume.
            volume.id = None;
            volume.insurance_value = None;
            volume.width_cm = volume.width_cm.max(LABEL_MIN_WIDTH_CM);
            volume.height_cm = volume.height_cm.max(LABEL_MIN_HEIGHT_CM);
            volume.length_cm = volume.length_cm.max(LABEL_MIN_LENGTH_CM);
            volume.weight_kg = volume.weight_kg.max(LABEL_MIN_WEIGHT_KG);
        }
    }
    volumes
}

fn carve(items: &[ResolvedItem], limits: &CarrierLimits) -> Vec<Volume> {
    let mut volumes = Vec::new();

    for item in items {
        let max_across = floor_at_least_one(limits.max_footprint_cm / item.unit_width_cm);
        let max_high = floor_at_least_one(limits.max_footprint_cm / item.unit_height_cm);
        let units_by_footprint = max_across.saturating_mul(max_high);
        let units_by_weight = floor_at_least_one(limits.max_weight_g / item.unit_weight_g);
        let units_per_volume = units_by_footprint.min(units_by_weight);

        let mut remaining = item.quantity.max(1);
        while remaining > 0 {
            let current = remaining.min(units_per_volume);

            // As square a stack as fits within the per-row capacity.
            let width_count = max_across.min(f64::from(current).sqrt().ceil() as u32).max(1);
            let height_count = current.div_ceil(width_count);

            volumes.push(Volume {
                id: Some(format!("{}_vol_{}", item.product, volumes.len())),
                width_cm: item.unit_width_cm * f64::from(width_count),
                height_cm: item.unit_height_cm * f64::from(height_count),
                // Length never multiplies: stacking happens in the
                // width/height footprint only.
                length_cm: item.unit_length_cm,
                weight_kg: item.unit_weight_g * f64::from(current) / 1000.0,
                insurance_value: Some(item.unit_price * f64::from(current)),
                quantity: 1,
            });
            remaining -= current;
        }
    }

    volumes
}

/// Floored division result, never below 1. Guards the unit-larger-than-limit
/// case; zero dimensions are the resolver's job to prevent.
fn floor_at_least_one(ratio: f64) -> u32 {
    if ratio.is_finite() && ratio >= 1.0 {
        ratio.floor().min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ProductRef;

    fn resolved(
        id: &str,
        quantity: u32,
        weight_g: f64,
        length: f64,
        width: f64,
        height: f64,
        price: f64,
    ) -> ResolvedItem {
        ResolvedItem {
            product: ProductRef::new(id),
            quantity,
            unit_weight_g: weight_g,
            unit_length_cm: length,
            unit_width_cm: width,
            unit_height_cm: height,
            unit_price: price,
        }
    }

    fn default_limits() -> CarrierLimits {
        CarrierLimits::default()
    }

    /// Units carved into a volume, recovered from its weight.
    fn units_in(volume: &Volume, unit_weight_g: f64) -> f64 {
        volume.weight_kg * 1000.0 / unit_weight_g
    }

    #[test]
    fn forty_units_split_thirty_then_ten() {
        let items = vec![resolved("1", 40, 1000.0, 50.0, 20.0, 15.0, 10.0)];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);

        assert_eq!(volumes.len(), 2);

        // First volume: 30 units, 5 across x 6 high.
        assert_eq!(volumes[0].width_cm, 100.0);
        assert_eq!(volumes[0].height_cm, 90.0);
        assert_eq!(volumes[0].length_cm, 50.0);
        assert_eq!(volumes[0].weight_kg, 30.0);
        assert_eq!(volumes[0].insurance_value, Some(300.0));

        // Second volume: remaining 10 units, 4 across x 3 high.
        assert_eq!(volumes[1].width_cm, 80.0);
        assert_eq!(volumes[1].height_cm, 45.0);
        assert_eq!(volumes[1].length_cm, 50.0);
        assert_eq!(volumes[1].weight_kg, 10.0);
        assert_eq!(volumes[1].insurance_value, Some(100.0));
    }

    #[test]
    fn single_unit_keeps_unit_dimensions() {
        let items = vec![resolved("1", 1, 800.0, 40.0, 30.0, 10.0, 25.0)];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);

        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].width_cm, 30.0);
        assert_eq!(volumes[0].height_cm, 10.0);
        assert_eq!(volumes[0].length_cm, 40.0);
        assert_eq!(volumes[0].weight_kg, 0.8);
        assert_eq!(volumes[0].quantity, 1);
    }

    #[test]
    fn unit_count_is_conserved_per_item() {
        let items = vec![
            resolved("a", 73, 700.0, 30.0, 18.0, 12.0, 5.0),
            resolved("b", 5, 12_000.0, 60.0, 40.0, 40.0, 80.0),
        ];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);

        let total_a: f64 = volumes
            .iter()
            .filter(|v| v.id.as_deref().unwrap_or("").starts_with("a_"))
            .map(|v| units_in(v, 700.0))
            .sum();
        let total_b: f64 = volumes
            .iter()
            .filter(|v| v.id.as_deref().unwrap_or("").starts_with("b_"))
            .map(|v| units_in(v, 12_000.0))
            .sum();

        assert_eq!(total_a.round() as u32, 73);
        assert_eq!(total_b.round() as u32, 5);
    }

    #[test]
    fn every_volume_respects_carrier_ceilings() {
        let limits = default_limits();
        let items = vec![
            resolved("a", 200, 450.0, 25.0, 11.0, 7.0, 3.0),
            resolved("b", 17, 9_500.0, 80.0, 33.0, 21.0, 120.0),
            resolved("c", 1, 1000.0, 50.0, 20.0, 15.0, 10.0),
        ];
        let volumes = pack(&items, &limits, PackMode::Quote);

        for v in &volumes {
            assert!(v.weight_kg * 1000.0 <= limits.max_weight_g + 1e-9);
            assert!(v.width_cm <= limits.max_footprint_cm + 1e-9);
            assert!(v.height_cm <= limits.max_footprint_cm + 1e-9);
        }
    }

    #[test]
    fn weight_is_the_binding_constraint_for_heavy_units() {
        // 10kg units: footprint would allow 5x6=30 but weight caps at 3.
        let items = vec![resolved("1", 7, 10_000.0, 50.0, 20.0, 15.0, 0.0)];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);

        assert_eq!(volumes.len(), 3);
        assert_eq!(units_in(&volumes[0], 10_000.0).round() as u32, 3);
        assert_eq!(units_in(&volumes[1], 10_000.0).round() as u32, 3);
        assert_eq!(units_in(&volumes[2], 10_000.0).round() as u32, 1);
    }

    #[test]
    fn footprint_is_the_binding_constraint_for_bulky_units() {
        // 60cm wide, 60cm high: only one unit fits the 100cm footprint.
        let items = vec![resolved("1", 4, 500.0, 30.0, 60.0, 60.0, 0.0)];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);

        assert_eq!(volumes.len(), 4);
        for v in &volumes {
            assert_eq!(v.width_cm, 60.0);
            assert_eq!(v.height_cm, 60.0);
        }
    }

    #[test]
    fn oversized_unit_still_ships_one_per_volume() {
        // Unit wider than the footprint limit: the floor-to-1 guard applies
        // and the volume exceeds the ceiling rather than losing the unit.
        let items = vec![resolved("1", 2, 500.0, 30.0, 120.0, 10.0, 0.0)];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);

        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[0].width_cm, 120.0);
    }

    #[test]
    fn packing_is_deterministic() {
        let items = vec![
            resolved("x", 37, 820.0, 44.0, 17.0, 9.0, 12.5),
            resolved("y", 3, 2_400.0, 70.0, 35.0, 25.0, 199.0),
        ];
        let first = pack(&items, &default_limits(), PackMode::Quote);
        let second = pack(&items, &default_limits(), PackMode::Quote);
        assert_eq!(first, second);
    }

    #[test]
    fn volumes_preserve_item_and_carve_order() {
        let items = vec![
            resolved("first", 35, 1000.0, 50.0, 20.0, 15.0, 1.0),
            resolved("second", 1, 1000.0, 50.0, 20.0, 15.0, 1.0),
        ];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);

        let ids: Vec<&str> = volumes.iter().filter_map(|v| v.id.as_deref()).collect();
        assert_eq!(ids, vec!["first_vol_0", "first_vol_1", "second_vol_2"]);
    }

    #[test]
    fn volumes_are_never_merged_across_items() {
        // Two tiny products that would trivially share one box still get one
        // volume each.
        let items = vec![
            resolved("a", 1, 100.0, 10.0, 5.0, 5.0, 1.0),
            resolved("b", 1, 100.0, 10.0, 5.0, 5.0, 1.0),
        ];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);
        assert_eq!(volumes.len(), 2);
    }

    #[test]
    fn label_mode_clamps_to_carrier_minimums() {
        let items = vec![resolved("1", 1, 50.0, 8.0, 6.0, 1.0, 20.0)];
        let volumes = pack(&items, &default_limits(), PackMode::Label);

        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].width_cm, LABEL_MIN_WIDTH_CM);
        assert_eq!(volumes[0].height_cm, LABEL_MIN_HEIGHT_CM);
        assert_eq!(volumes[0].length_cm, LABEL_MIN_LENGTH_CM);
        assert_eq!(volumes[0].weight_kg, LABEL_MIN_WEIGHT_KG);
        assert_eq!(volumes[0].insurance_value, None);
        assert_eq!(volumes[0].id, None);
    }

    #[test]
    fn label_mode_is_monotonic_over_quote_mode() {
        let items = vec![
            resolved("a", 12, 300.0, 12.0, 9.0, 1.5, 7.0),
            resolved("b", 40, 1000.0, 50.0, 20.0, 15.0, 10.0),
        ];
        let quote = pack(&items, &default_limits(), PackMode::Quote);
        let label = pack(&items, &default_limits(), PackMode::Label);

        assert_eq!(quote.len(), label.len());
        for (q, l) in quote.iter().zip(&label) {
            assert!(l.width_cm >= q.width_cm && l.width_cm >= LABEL_MIN_WIDTH_CM);
            assert!(l.height_cm >= q.height_cm && l.height_cm >= LABEL_MIN_HEIGHT_CM);
            assert!(l.length_cm >= q.length_cm && l.length_cm >= LABEL_MIN_LENGTH_CM);
            assert!(l.weight_kg >= q.weight_kg && l.weight_kg >= LABEL_MIN_WEIGHT_KG);
        }
    }

    #[test]
    fn quote_mode_carries_per_volume_insurance() {
        let items = vec![resolved("1", 40, 1000.0, 50.0, 20.0, 15.0, 2.5)];
        let volumes = pack(&items, &default_limits(), PackMode::Quote);

        assert_eq!(volumes[0].insurance_value, Some(75.0)); // 30 units x 2.5
        assert_eq!(volumes[1].insurance_value, Some(25.0)); // 10 units x 2.5
    }
}
