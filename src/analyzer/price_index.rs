use crate::models::GemPrice;
use std::collections::HashMap;

/// Cheapest non-corrupted price per gem name.
#[derive(Debug, Default)]
pub struct PriceIndex {
    prices: HashMap<String, GemPrice>,
    valid_lines: usize,
}

impl PriceIndex {
    pub fn build(lines: &[GemPrice]) -> Self {
        let mut index = Self::default();
        for line in lines {
            index.add(line);
        }
        index
    }

    fn add(&mut self, line: &GemPrice) {
        if line.corrupted {
            return;
        }
        self.valid_lines += 1;

        // Strictly lower replaces, so the first listing wins a tie
        match self.prices.get(&line.name) {
            Some(existing) if line.chaos_value >= existing.chaos_value => {}
            _ => {
                self.prices.insert(line.name.clone(), line.clone());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&GemPrice> {
        self.prices.get(name)
    }

    pub fn valid_lines(&self) -> usize {
        self.valid_lines
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(index: &PriceIndex, name: &str) -> f64 {
        index.get(name).map(|p| p.chaos_value).unwrap_or(0.0)
    }

    #[test]
    fn test_keeps_minimum_valid_price() {
        let lines = vec![
            GemPrice::new("A", 100.0),
            GemPrice::new("A", 50.0),
            GemPrice::new("A", 200.0).corrupted(),
        ];
        let index = PriceIndex::build(&lines);
        assert_eq!(price(&index, "A"), 50.0);
        assert_eq!(index.valid_lines(), 2);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_corrupted_excluded_even_when_cheaper() {
        let lines = vec![
            GemPrice::new("A", 1.0).corrupted(),
            GemPrice::new("A", 80.0),
        ];
        let index = PriceIndex::build(&lines);
        assert_eq!(price(&index, "A"), 80.0);
        assert_eq!(index.valid_lines(), 1);
    }

    #[test]
    fn test_first_seen_wins_on_ties() {
        let lines = vec![
            GemPrice::new("A", 20.0).with_count(7),
            GemPrice::new("A", 20.0).with_count(99),
        ];
        let index = PriceIndex::build(&lines);
        assert_eq!(index.get("A").map(|p| p.count), Some(7));
    }

    #[test]
    fn test_unknown_and_empty() {
        let index = PriceIndex::build(&[]);
        assert_eq!(index.len(), 0);
        assert_eq!(index.valid_lines(), 0);
        assert_eq!(price(&index, "missing"), 0.0);
        assert!(index.get("missing").is_none());
    }
}
