use tabled::{Table, Tabled};

use crate::analyzer::{hit_probability, FONT_DRAWS};
use crate::app::Snapshot;
use crate::models::{ColorStats, GemColor, GemEntry, League};

use super::format::{format_age, format_chaos, format_pct, PriceTier};

const SEPARATOR: &str = " · ";

#[derive(Tabled)]
struct GemRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Base gem")]
    name: String,
    #[tabled(rename = "EV")]
    ev: String,
    #[tabled(rename = "Tier")]
    tier: &'static str,
    #[tabled(rename = "Listed")]
    listed: String,
    #[tabled(rename = "Best")]
    best: String,
}

#[derive(Tabled)]
struct BingoRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Gem")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Hit chance")]
    chance: String,
    #[tabled(rename = "Listings")]
    listings: u32,
}

#[derive(Tabled)]
struct VariantRow {
    #[tabled(rename = "Variant")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Chance")]
    chance: String,
    #[tabled(rename = "Listings")]
    listings: String,
}

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "Base gem")]
    name: String,
    #[tabled(rename = "Color")]
    color: &'static str,
    #[tabled(rename = "EV")]
    ev: String,
}

pub fn leagues(leagues: &[League]) -> String {
    if leagues.is_empty() {
        return "No active leagues\n".to_string();
    }
    let mut out = String::new();
    for league in leagues {
        out.push_str(&format!("{}\n", league.text));
    }
    out
}

fn pool_header(stats: Option<&ColorStats>, color: GemColor) -> String {
    match stats {
        Some(s) => format!(
            "{} ({}){}{} gems{}Pool EV: {}",
            color.label(),
            color.attribute(),
            SEPARATOR,
            s.pool_size,
            SEPARATOR,
            format_chaos(s.pool_ev)
        ),
        None => format!("{} ({})", color.label(), color.attribute()),
    }
}

pub fn status_line(snapshot: &Snapshot) -> String {
    format!(
        "League: {}{}Cache: {}{}{} gems{}{} price lines",
        snapshot.league.text,
        SEPARATOR,
        format_age(snapshot.price_age),
        SEPARATOR,
        snapshot.result.gem_picks.len(),
        SEPARATOR,
        snapshot.result.total_lines
    )
}

pub fn gems(snapshot: &Snapshot, colors: &[GemColor]) -> String {
    let mut out = String::new();

    for &color in colors {
        out.push_str(&format!("{}\n", pool_header(snapshot.result.stats(color), color)));

        let rows: Vec<GemRow> = snapshot
            .result
            .picks_for(color)
            .enumerate()
            .map(|(i, entry)| GemRow {
                rank: i + 1,
                name: entry.base_name.clone(),
                ev: format_chaos(entry.ev),
                tier: PriceTier::of(entry.ev).label(),
                listed: format!("{}/{}", entry.listed_count(), entry.variant_count),
                best: format_chaos(entry.best_price()),
            })
            .collect();

        if rows.is_empty() {
            out.push_str("  no transfigured gems\n\n");
        } else {
            out.push_str(&format!("{}\n\n", Table::new(rows)));
        }
    }

    out.push_str(&status_line(snapshot));
    out.push('\n');
    out
}

pub fn pool(snapshot: &Snapshot, colors: &[GemColor]) -> String {
    let mut out = String::new();

    for &color in colors {
        let Some(stats) = snapshot.result.stats(color) else {
            continue;
        };

        out.push_str(&format!(
            "{}{}best of {}{}hit chance per gem: {}\n",
            pool_header(Some(stats), color),
            SEPARATOR,
            FONT_DRAWS,
            SEPARATOR,
            format_pct(hit_probability(stats.pool_size, FONT_DRAWS)),
        ));

        if stats.bingo.is_empty() {
            out.push_str("  no priced gems\n\n");
            continue;
        }

        let rows: Vec<BingoRow> = stats
            .bingo
            .iter()
            .enumerate()
            .map(|(i, gem)| BingoRow {
                rank: i + 1,
                name: gem.name.clone(),
                price: format_chaos(gem.sell_price),
                chance: format_pct(gem.prob),
                listings: gem.count,
            })
            .collect();
        out.push_str(&format!("{}\n\n", Table::new(rows)));
    }

    out.push_str(&status_line(snapshot));
    out.push('\n');
    out
}

pub fn detail(entry: &GemEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n{} gem{}EV: {}{}{} variants\n",
        entry.base_name,
        entry.color.label(),
        SEPARATOR,
        format_chaos(entry.ev),
        SEPARATOR,
        entry.variant_count,
    ));

    let rows: Vec<VariantRow> = entry
        .variants
        .iter()
        .map(|v| VariantRow {
            name: v.name.clone(),
            price: format_chaos(v.sell_price),
            chance: format_pct(v.prob),
            listings: if v.listed {
                v.count.to_string()
            } else {
                "unlisted".to_string()
            },
        })
        .collect();
    out.push_str(&format!("{}\n", Table::new(rows)));
    out
}

pub fn search(matches: &[&GemEntry]) -> String {
    if matches.is_empty() {
        return "No results\n".to_string();
    }

    let rows: Vec<SearchRow> = matches
        .iter()
        .map(|entry| SearchRow {
            name: entry.base_name.clone(),
            color: entry.color.label(),
            ev: format_chaos(entry.ev),
        })
        .collect();
    format!("{}\n", Table::new(rows))
}
