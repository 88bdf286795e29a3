use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Gem colors follow the core attribute a gem scales with
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum GemColor {
    #[serde(rename = "r")]
    Red,
    #[serde(rename = "g")]
    Green,
    #[serde(rename = "b")]
    Blue,
}

impl GemColor {
    /// Canonical order: the order poewiki lists its attribute tables in.
    pub const ALL: [GemColor; 3] = [GemColor::Red, GemColor::Green, GemColor::Blue];

    pub fn code(&self) -> &'static str {
        match self {
            GemColor::Red => "r",
            GemColor::Green => "g",
            GemColor::Blue => "b",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GemColor::Red => "Red",
            GemColor::Green => "Green",
            GemColor::Blue => "Blue",
        }
    }

    pub fn attribute(&self) -> &'static str {
        match self {
            GemColor::Red => "Strength",
            GemColor::Green => "Dexterity",
            GemColor::Blue => "Intelligence",
        }
    }
}

impl fmt::Display for GemColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GemColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "red" | "str" | "strength" => Ok(GemColor::Red),
            "g" | "green" | "dex" | "dexterity" => Ok(GemColor::Green),
            "b" | "blue" | "int" | "intelligence" => Ok(GemColor::Blue),
            other => Err(format!("unknown gem color '{}' (expected red, green or blue)", other)),
        }
    }
}
