use serde::Deserialize;
use tracing::info;

use crate::errors::{GemcheckError, Result};
use crate::fetcher::http::HttpClient;
use crate::fetcher::with_context;
use crate::models::{GemPrice, League};

const LEAGUES_URL: &str = "https://api.pathofexile.com/leagues";
const NINJA_ITEM_OVERVIEW_URL: &str = "https://poe.ninja/api/data/itemoverview";

#[derive(Debug, Deserialize)]
struct LeagueLine {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ItemOverviewResponse {
    #[serde(default)]
    lines: Option<Vec<GemLine>>,
}

/// poe.ninja sends `null` for some fields; a null or missing field reads as its zero value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GemLine {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    chaos_value: Option<f64>,
    #[serde(default)]
    count: Option<u32>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    corrupted: Option<bool>,
}

impl From<GemLine> for GemPrice {
    fn from(line: GemLine) -> Self {
        GemPrice {
            name: line.name.unwrap_or_default(),
            chaos_value: line.chaos_value.unwrap_or_default(),
            count: line.count.unwrap_or_default(),
            icon: line.icon.unwrap_or_default(),
            corrupted: line.corrupted.unwrap_or_default(),
        }
    }
}

/// Client for the league list (pathofexile.com) and gem prices (poe.ninja).
pub struct NinjaApi {
    http: HttpClient,
}

impl NinjaApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Active PoE1 main leagues.
    pub async fn fetch_leagues(&self) -> Result<Vec<League>> {
        let body = self
            .http
            .get_text(
                LEAGUES_URL,
                &[("type", "main"), ("compact", "1"), ("game", "poe1")],
            )
            .await
            .map_err(|e| with_context("fetching leagues", e))?;

        let leagues = parse_leagues(&body)?;
        info!(count = leagues.len(), "fetched leagues");
        Ok(leagues)
    }

    /// Skill gem price lines for a league, corrupted listings included.
    pub async fn fetch_gem_prices(&self, league: &str) -> Result<Vec<GemPrice>> {
        let body = self
            .http
            .get_text(
                NINJA_ITEM_OVERVIEW_URL,
                &[("league", league), ("type", "SkillGem"), ("game", "poe1")],
            )
            .await
            .map_err(|e| with_context("fetching gem prices", e))?;

        let prices = parse_gem_prices(&body)?;
        info!(league, count = prices.len(), "fetched gem prices");
        Ok(prices)
    }
}

pub fn parse_leagues(body: &str) -> Result<Vec<League>> {
    let lines: Vec<LeagueLine> = serde_json::from_str(body)
        .map_err(|e| GemcheckError::ParseError(format!("parsing leagues: {}", e)))?;

    Ok(lines
        .into_iter()
        .map(|l| League {
            text: l.id.clone(),
            id: l.id,
        })
        .collect())
}

pub fn parse_gem_prices(body: &str) -> Result<Vec<GemPrice>> {
    let response: ItemOverviewResponse = serde_json::from_str(body)
        .map_err(|e| GemcheckError::ParseError(format!("parsing gem prices: {}", e)))?;

    Ok(response
        .lines
        .unwrap_or_default()
        .into_iter()
        .map(GemPrice::from)
        .collect())
}
