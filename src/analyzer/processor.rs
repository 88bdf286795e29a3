use crate::analyzer::gem_ev::color_entries;
use crate::analyzer::pool_stats::{color_stats, FONT_DRAWS};
use crate::analyzer::price_index::PriceIndex;
use crate::models::{GemCatalog, GemColor, GemPrice, ProcessedResult};
use std::collections::HashMap;
use tracing::debug;

/// Joins poe.ninja prices against the wiki catalog and computes per-base-gem
/// EV and per-color best-of-three pool EV.
///
/// Pure and deterministic: identical inputs give identical results, and all
/// orderings use stable sorts so ties keep catalog order.
pub fn process_gems(catalog: &GemCatalog, prices: &[GemPrice], top_n: usize) -> ProcessedResult {
    let index = PriceIndex::build(prices);

    let mut gem_picks = Vec::new();
    for color in GemColor::ALL {
        gem_picks.extend(color_entries(color, catalog.transfigured(color), &index));
    }
    gem_picks.sort_by(|a, b| b.ev.total_cmp(&a.ev));

    let mut color_stats_by_color = HashMap::new();
    let mut total_transfig = 0;
    for color in GemColor::ALL {
        let stats = color_stats(color, catalog.transfigured(color), &index, top_n, FONT_DRAWS);
        total_transfig += stats.pool_size;
        color_stats_by_color.insert(color, stats);
    }

    debug!(
        price_lines = index.valid_lines(),
        priced_gems = index.len(),
        base_gems = gem_picks.len(),
        transfigured = total_transfig,
        "processed gem data"
    );

    ProcessedResult {
        color_stats: color_stats_by_color,
        gem_picks,
        total_lines: index.valid_lines(),
        total_transfig,
    }
}
