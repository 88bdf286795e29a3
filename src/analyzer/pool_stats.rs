use crate::analyzer::price_index::PriceIndex;
use crate::models::{BingoGem, ColorStats, GemColor};

/// Gems offered per Font of Divine Skill use; the player keeps the best one.
pub const FONT_DRAWS: u32 = 3;

struct PoolGem<'a> {
    name: &'a str,
    sell_price: f64,
    count: u32,
    icon: &'a str,
}

/// Probability that the gem at descending-price rank `rank` is the best of
/// `draws` uniform draws with replacement from a pool of `pool_size` gems.
///
/// P(max at rank i) = ((n-i)/n)^k - ((n-i-1)/n)^k
pub fn best_of_probability(rank: usize, pool_size: usize, draws: u32) -> f64 {
    if pool_size == 0 || rank >= pool_size {
        return 0.0;
    }
    let n = pool_size as f64;
    let at_or_below = (pool_size - rank) as f64 / n;
    let below = (pool_size - rank - 1) as f64 / n;
    at_or_below.powi(draws as i32) - below.powi(draws as i32)
}

/// Probability of seeing one specific gem at least once in `draws` draws.
pub fn hit_probability(pool_size: usize, draws: u32) -> f64 {
    if pool_size == 0 {
        return 0.0;
    }
    let n = pool_size as f64;
    1.0 - ((n - 1.0) / n).powi(draws as i32)
}

/// Best-of-`draws` statistics for a whole color pool. Every listed name is a
/// separate pool member, duplicates included.
pub fn color_stats(
    color: GemColor,
    names: &[String],
    index: &PriceIndex,
    top_n: usize,
    draws: u32,
) -> ColorStats {
    let n = names.len();
    if n == 0 {
        return ColorStats::empty(color);
    }

    let mut pool: Vec<PoolGem> = names
        .iter()
        .map(|name| match index.get(name) {
            Some(price) => PoolGem {
                name,
                sell_price: price.chaos_value,
                count: price.count,
                icon: &price.icon,
            },
            None => PoolGem {
                name,
                sell_price: 0.0,
                count: 0,
                icon: "",
            },
        })
        .collect();

    pool.sort_by(|a, b| b.sell_price.total_cmp(&a.sell_price));

    let pool_ev: f64 = pool
        .iter()
        .enumerate()
        .map(|(rank, gem)| gem.sell_price * best_of_probability(rank, n, draws))
        .sum();

    let hit_prob = hit_probability(n, draws);
    let bingo = pool
        .iter()
        .take_while(|gem| gem.sell_price > 0.0)
        .take(top_n)
        .map(|gem| BingoGem {
            name: gem.name.to_string(),
            sell_price: gem.sell_price,
            prob: hit_prob,
            count: gem.count,
            icon: gem.icon.to_string(),
        })
        .collect();

    ColorStats {
        color,
        pool_size: n,
        pool_ev,
        bingo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GemPrice;
    use rand::Rng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_gem_pool_worked_example() {
        assert!((best_of_probability(0, 2, 3) - 0.875).abs() < 1e-12);
        assert!((best_of_probability(1, 2, 3) - 0.125).abs() < 1e-12);

        let index = PriceIndex::build(&[
            GemPrice::new("Boneshatter of Carnage", 100.0),
            GemPrice::new("Boneshatter of Complex Trauma", 50.0),
        ]);
        let stats = color_stats(
            GemColor::Red,
            &names(&["Boneshatter of Complex Trauma", "Boneshatter of Carnage"]),
            &index,
            10,
            FONT_DRAWS,
        );
        assert_eq!(stats.pool_size, 2);
        assert!((stats.pool_ev - 93.75).abs() < 1e-9);
        assert_eq!(stats.bingo[0].name, "Boneshatter of Carnage");
    }

    #[test]
    fn test_probabilities_partition_the_pool() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let n = rng.gen_range(1..400);
            let draws = rng.gen_range(1..6);
            let total: f64 = (0..n).map(|i| best_of_probability(i, n, draws)).sum();
            assert!((total - 1.0).abs() < 1e-9, "n={} k={} total={}", n, draws, total);
        }
    }

    #[test]
    fn test_empty_pool() {
        let index = PriceIndex::build(&[GemPrice::new("Anything", 10.0)]);
        let stats = color_stats(GemColor::Green, &[], &index, 10, FONT_DRAWS);
        assert_eq!(stats.pool_size, 0);
        assert_eq!(stats.pool_ev, 0.0);
        assert!(stats.bingo.is_empty());
        assert_eq!(hit_probability(0, FONT_DRAWS), 0.0);
    }

    #[test]
    fn test_single_gem_pool_is_certain() {
        assert_eq!(best_of_probability(0, 1, FONT_DRAWS), 1.0);
        let index = PriceIndex::build(&[GemPrice::new("Arc of Surging", 42.0)]);
        let pool = names(&["Arc of Surging"]);
        let stats = color_stats(GemColor::Blue, &pool, &index, 10, FONT_DRAWS);
        assert!((stats.pool_ev - 42.0).abs() < 1e-12);
        assert_eq!(stats.bingo.len(), 1);
        assert_eq!(stats.bingo[0].prob, 1.0);
    }

    #[test]
    fn test_bingo_stops_at_unpriced_and_respects_limit() {
        let index = PriceIndex::build(&[
            GemPrice::new("A of X", 5.0),
            GemPrice::new("B of X", 50.0),
            GemPrice::new("C of X", 20.0),
            GemPrice::new("D of X", 0.0),
        ]);
        let pool = names(&["A of X", "B of X", "C of X", "D of X", "E of X"]);

        let stats = color_stats(GemColor::Red, &pool, &index, 10, FONT_DRAWS);
        let prices: Vec<f64> = stats.bingo.iter().map(|b| b.sell_price).collect();
        assert_eq!(prices, vec![50.0, 20.0, 5.0]);
        assert_eq!(stats.pool_size, 5);

        let limited = color_stats(GemColor::Red, &pool, &index, 2, FONT_DRAWS);
        assert_eq!(limited.bingo.len(), 2);
    }

    #[test]
    fn test_duplicate_names_count_as_separate_members() {
        let index = PriceIndex::build(&[GemPrice::new("A of X", 10.0)]);
        let pool = names(&["A of X", "A of X"]);
        let stats = color_stats(GemColor::Red, &pool, &index, 10, FONT_DRAWS);
        assert_eq!(stats.pool_size, 2);
        assert!((stats.pool_ev - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_probability_for_typical_pool() {
        let p = hit_probability(32, FONT_DRAWS);
        assert!((p - 0.0911).abs() < 0.001);
    }
}
