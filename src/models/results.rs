use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::gem_color::GemColor;

/// A transfigured gem with its draw probability inside its base gem's roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemVariantResult {
    pub name: String,
    pub sell_price: f64,
    pub prob: f64,
    pub count: u32,
    pub icon: String,
    pub listed: bool,
}

/// A base gem, its transfigured variants and the EV of rolling one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemEntry {
    pub base_name: String,
    pub color: GemColor,
    pub variants: Vec<GemVariantResult>,
    pub ev: f64,
    pub variant_count: usize,
}

impl GemEntry {
    pub fn best_price(&self) -> f64 {
        self.variants
            .iter()
            .map(|v| v.sell_price)
            .fold(0.0, f64::max)
    }

    pub fn listed_count(&self) -> usize {
        self.variants.iter().filter(|v| v.listed).count()
    }
}

/// A priced gem in a color pool with the chance of seeing it in one font use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BingoGem {
    pub name: String,
    pub sell_price: f64,
    pub prob: f64,
    pub count: u32,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStats {
    pub color: GemColor,
    pub pool_size: usize,
    pub pool_ev: f64,
    pub bingo: Vec<BingoGem>,
}

impl ColorStats {
    pub fn empty(color: GemColor) -> Self {
        Self {
            color,
            pool_size: 0,
            pool_ev: 0.0,
            bingo: Vec::new(),
        }
    }
}

/// Everything the front end needs, computed once per catalog/price pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub color_stats: HashMap<GemColor, ColorStats>,
    pub gem_picks: Vec<GemEntry>,
    pub total_lines: usize,
    pub total_transfig: usize,
}

impl ProcessedResult {
    pub fn stats(&self, color: GemColor) -> Option<&ColorStats> {
        self.color_stats.get(&color)
    }

    /// Entries of one color, still in EV order.
    pub fn picks_for(&self, color: GemColor) -> impl Iterator<Item = &GemEntry> {
        self.gem_picks.iter().filter(move |e| e.color == color)
    }

    pub fn find_entry(&self, base_name: &str) -> Option<&GemEntry> {
        let wanted = base_name.trim();
        self.gem_picks
            .iter()
            .find(|e| e.base_name.eq_ignore_ascii_case(wanted))
    }

    /// Case-insensitive substring search over base names, in EV order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&GemEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.gem_picks
            .iter()
            .filter(|e| e.base_name.to_lowercase().contains(&query))
            .take(limit)
            .collect()
    }
}
