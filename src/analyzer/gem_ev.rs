use crate::analyzer::price_index::PriceIndex;
use crate::models::{extract_base_name, GemColor, GemEntry, GemVariantResult};
use std::collections::HashMap;

/// Groups one color's transfigured gems by base gem and computes the EV of a
/// uniform roll among each base gem's known variants.
///
/// Groups come out in first-seen order; callers sort the combined list.
pub fn color_entries(color: GemColor, names: &[String], index: &PriceIndex) -> Vec<GemEntry> {
    let mut group_of: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<GemVariantResult>)> = Vec::new();

    for name in names {
        let base_name = extract_base_name(name);
        let variant = variant_result(name, index);

        match group_of.get(base_name) {
            Some(&slot) => groups[slot].1.push(variant),
            None => {
                group_of.insert(base_name, groups.len());
                groups.push((base_name, vec![variant]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(base_name, variants)| build_entry(base_name, color, variants))
        .collect()
}

fn variant_result(name: &str, index: &PriceIndex) -> GemVariantResult {
    match index.get(name) {
        Some(price) => GemVariantResult {
            name: name.to_string(),
            sell_price: price.chaos_value,
            prob: 0.0,
            count: price.count,
            icon: price.icon.clone(),
            listed: true,
        },
        None => GemVariantResult {
            name: name.to_string(),
            sell_price: 0.0,
            prob: 0.0,
            count: 0,
            icon: String::new(),
            listed: false,
        },
    }
}

fn build_entry(base_name: &str, color: GemColor, mut variants: Vec<GemVariantResult>) -> GemEntry {
    let n = variants.len();
    let prob = 1.0 / n as f64;
    for variant in variants.iter_mut() {
        variant.prob = prob;
    }

    // Stable: equal prices keep catalog order
    variants.sort_by(|a, b| b.sell_price.total_cmp(&a.sell_price));

    let ev = variants.iter().map(|v| v.sell_price).sum::<f64>() / n as f64;

    GemEntry {
        base_name: base_name.to_string(),
        color,
        variants,
        ev,
        variant_count: n,
    }
}
