use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::gem_color::GemColor;

/// One price line from poe.ninja. Several lines can share a name
/// (different level/quality/corruption listings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemPrice {
    pub name: String,
    pub chaos_value: f64,
    pub count: u32,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub corrupted: bool,
}

impl GemPrice {
    pub fn new(name: &str, chaos_value: f64) -> Self {
        Self {
            name: name.to_string(),
            chaos_value,
            count: 0,
            icon: String::new(),
            corrupted: false,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn corrupted(mut self) -> Self {
        self.corrupted = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub text: String,
}

impl League {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            text: id.to_string(),
        }
    }
}

/// Reference catalog scraped from poewiki: per color, sorted base gem names
/// and sorted transfigured gem names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GemCatalog {
    pub base_gems: HashMap<GemColor, Vec<String>>,
    pub transfig_gems: HashMap<GemColor, Vec<String>>,
}

impl GemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transfigured(mut self, color: GemColor, names: &[&str]) -> Self {
        self.transfig_gems
            .insert(color, names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn with_base(mut self, color: GemColor, names: &[&str]) -> Self {
        self.base_gems
            .insert(color, names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Transfigured names for a color; a missing color reads as empty.
    pub fn transfigured(&self, color: GemColor) -> &[String] {
        self.transfig_gems
            .get(&color)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn base(&self, color: GemColor) -> &[String] {
        self.base_gems.get(&color).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Derives the base gem name from a transfigured gem name.
///
/// Transfigured names append an "of ..." qualifier to the base name, and some
/// base names contain " of " themselves, so the last occurrence is the split point:
/// `"Eye of Winter of Finality"` yields `"Eye of Winter"`.
pub fn extract_base_name(name: &str) -> &str {
    match name.rfind(" of ") {
        Some(idx) => &name[..idx],
        None => name,
    }
}
