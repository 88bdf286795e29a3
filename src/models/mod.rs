pub mod gem;
pub mod gem_color;
pub mod results;

pub use gem::{
    extract_base_name,
    GemCatalog,
    GemPrice,
    League,
};

pub use gem_color::GemColor;

pub use results::{
    BingoGem,
    ColorStats,
    GemEntry,
    GemVariantResult,
    ProcessedResult,
};
