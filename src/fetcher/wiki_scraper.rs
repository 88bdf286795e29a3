use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::errors::{GemcheckError, Result};
use crate::fetcher::http::HttpClient;
use crate::fetcher::with_context;
use crate::models::{GemCatalog, GemColor};

const BASE_GEMS_URL: &str = "https://www.poewiki.net/wiki/List_of_skill_gems";
const TRANSFIG_GEMS_URL: &str = "https://www.poewiki.net/wiki/Transfigured_skill_gem";

/// Scrapes the gem catalog from poewiki. Both pages list their gems in one
/// `item-table` per attribute, in Strength, Dexterity, Intelligence order.
pub struct WikiScraper {
    http: HttpClient,
    request_delay: Duration,
}

impl WikiScraper {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            request_delay: Duration::from_millis(500),
        }
    }

    pub async fn fetch_catalog(&self) -> Result<GemCatalog> {
        let base_gems = self
            .scrape_page(BASE_GEMS_URL)
            .await
            .map_err(|e| with_context("scraping base gems", e))?;

        // Stay polite with the wiki between page loads
        let delay = self.request_delay + Duration::from_millis(rand::random::<u64>() % 100);
        sleep(delay).await;

        let transfig_gems = self
            .scrape_page(TRANSFIG_GEMS_URL)
            .await
            .map_err(|e| with_context("scraping transfigured gems", e))?;

        let catalog = GemCatalog {
            base_gems,
            transfig_gems,
        };
        info!(
            base = GemColor::ALL.iter().map(|c| catalog.base(*c).len()).sum::<usize>(),
            transfigured = GemColor::ALL
                .iter()
                .map(|c| catalog.transfigured(*c).len())
                .sum::<usize>(),
            "scraped gem catalog"
        );
        Ok(catalog)
    }

    async fn scrape_page(&self, url: &str) -> Result<HashMap<GemColor, Vec<String>>> {
        let body = self.http.get_text(url, &[]).await?;
        parse_gem_tables(&body)
    }
}

/// Extracts sorted gem names per color from the first three item tables of a
/// poewiki page. Colors without a table get an empty list.
pub fn parse_gem_tables(html: &str) -> Result<HashMap<GemColor, Vec<String>>> {
    let table_sel = selector("table.item-table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let link_sel = selector("a")?;

    let document = Html::parse_document(html);
    let mut result = HashMap::new();

    for (color, table) in GemColor::ALL.iter().zip(document.select(&table_sel)) {
        let mut gems = extract_gems(table, &row_sel, &cell_sel, &link_sel);
        gems.sort();
        result.insert(*color, gems);
    }

    if result.len() < GemColor::ALL.len() {
        warn!(found = result.len(), "fewer item tables than gem colors");
    }
    for color in GemColor::ALL {
        result.entry(color).or_insert_with(Vec::new);
    }

    Ok(result)
}

fn extract_gems(
    table: ElementRef,
    row_sel: &Selector,
    cell_sel: &Selector,
    link_sel: &Selector,
) -> Vec<String> {
    let mut gems = Vec::new();
    let mut seen = HashSet::new();

    for row in table.select(row_sel) {
        // Header rows only have <th>
        let Some(first_cell) = row.select(cell_sel).next() else {
            continue;
        };

        for link in first_cell.select(link_sel) {
            let href = link.value().attr("href").unwrap_or("");
            if href.starts_with("/wiki/File:") || href.starts_with("/wiki/Special:") {
                continue;
            }
            let title = link.value().attr("title").unwrap_or("");
            let text = link.text().collect::<String>();
            let text = text.trim();
            // An already-seen name falls through to the next link in the cell
            if !text.is_empty() && text == title && seen.insert(text.to_string()) {
                gems.push(text.to_string());
                break;
            }
        }
    }

    gems
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| GemcheckError::ParseError(format!("invalid selector {}: {:?}", css, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[String]) -> String {
        format!(
            r#"<table class="wikitable sortable item-table"><tr><th>Name</th><th>Tags</th></tr>{}</table>"#,
            rows.join("")
        )
    }

    fn gem_row(name: &str) -> String {
        format!(
            r#"<tr><td><a href="/wiki/File:{n}_inventory_icon.png" title="File:{n}"><img/></a><a href="/wiki/{n}" title="{n}">{n}</a></td><td>Attack</td></tr>"#,
            n = name
        )
    }

    #[test]
    fn test_parses_three_tables_in_color_order() {
        let html = format!(
            "<html><body>{}{}<table class=\"wikitable\"><tr><td><a href=\"/wiki/X\" title=\"X\">X</a></td></tr></table>{}</body></html>",
            table(&[gem_row("Sunder of Earthbreaking"), gem_row("Cleave of Rage")]),
            table(&[gem_row("Frenzy of Onslaught")]),
            table(&[gem_row("Arc of Surging"), gem_row("Arc of Oscillating")]),
        );

        let gems = parse_gem_tables(&html).unwrap();
        assert_eq!(gems[&GemColor::Red], vec!["Cleave of Rage", "Sunder of Earthbreaking"]);
        assert_eq!(gems[&GemColor::Green], vec!["Frenzy of Onslaught"]);
        assert_eq!(gems[&GemColor::Blue], vec!["Arc of Oscillating", "Arc of Surging"]);
    }

    #[test]
    fn test_skips_file_links_and_deduplicates() {
        let html = table(&[
            gem_row("Cleave of Rage"),
            gem_row("Cleave of Rage"),
            r#"<tr><td><a href="/wiki/Special:Search" title="Special:Search">Special:Search</a></td></tr>"#
                .to_string(),
            r#"<tr><td><a href="/wiki/Cleave" title="Cleave">Cleave (skill)</a></td></tr>"#.to_string(),
        ]);

        let gems = parse_gem_tables(&html).unwrap();
        assert_eq!(gems[&GemColor::Red], vec!["Cleave of Rage"]);
    }

    #[test]
    fn test_seen_name_falls_through_to_next_link() {
        let html = table(&[
            gem_row("Cleave of Rage"),
            r#"<tr><td><a href="/wiki/Cleave_of_Rage" title="Cleave of Rage">Cleave of Rage</a><a href="/wiki/Cleave_of_Flow" title="Cleave of Flow">Cleave of Flow</a></td></tr>"#
                .to_string(),
        ]);

        let gems = parse_gem_tables(&html).unwrap();
        assert_eq!(gems[&GemColor::Red], vec!["Cleave of Flow", "Cleave of Rage"]);
    }

    #[test]
    fn test_missing_tables_yield_empty_colors() {
        let gems = parse_gem_tables("<html><body><p>Maintenance</p></body></html>").unwrap();
        assert_eq!(gems.len(), 3);
        assert!(gems.values().all(Vec::is_empty));

        let one = parse_gem_tables(&table(&[gem_row("Boneshatter of Carnage")])).unwrap();
        assert_eq!(one[&GemColor::Red].len(), 1);
        assert!(one[&GemColor::Green].is_empty());
        assert!(one[&GemColor::Blue].is_empty());
    }
}
