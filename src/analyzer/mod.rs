mod gem_ev;
mod pool_stats;
mod price_index;
mod processor;

pub use pool_stats::{hit_probability, FONT_DRAWS};
pub use processor::process_gems;
