mod http;
mod ninja_api;
mod wiki_scraper;

pub use http::HttpClient;
pub use ninja_api::NinjaApi;
pub use wiki_scraper::WikiScraper;

use crate::errors::GemcheckError;

/// Prefixes transport and parse errors with what was being fetched.
fn with_context(what: &str, err: GemcheckError) -> GemcheckError {
    match err {
        GemcheckError::ApiError(msg) => GemcheckError::ApiError(format!("{}: {}", what, msg)),
        GemcheckError::NetworkError(msg) => {
            GemcheckError::NetworkError(format!("{}: {}", what, msg))
        }
        GemcheckError::ParseError(msg) => GemcheckError::ParseError(format!("{}: {}", what, msg)),
        other => other,
    }
}
