use std::time::Duration;

pub fn format_chaos(value: f64) -> String {
    if value == 0.0 {
        return "—".to_string();
    }
    if value >= 1000.0 {
        return format!("{:.1}k c", value / 1000.0);
    }
    if value >= 100.0 {
        return format!("{:.0}c", value);
    }
    format!("{:.1}c", value)
}

pub fn format_pct(prob: f64) -> String {
    format!("{:.1}%", prob * 100.0)
}

pub fn format_age(age: Option<Duration>) -> String {
    match age {
        None => "fresh".to_string(),
        Some(d) if d.is_zero() => "fresh".to_string(),
        Some(d) if d < Duration::from_secs(60) => format!("{}s ago", d.as_secs()),
        Some(d) => format!("{}m ago", d.as_secs() / 60),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    High,
    Mid,
    Low,
}

impl PriceTier {
    pub fn of(chaos: f64) -> Self {
        if chaos >= 50.0 {
            PriceTier::High
        } else if chaos >= 10.0 {
            PriceTier::Mid
        } else {
            PriceTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::High => "high",
            PriceTier::Mid => "mid",
            PriceTier::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_chaos() {
        assert_eq!(format_chaos(0.0), "—");
        assert_eq!(format_chaos(5.5), "5.5c");
        assert_eq!(format_chaos(150.0), "150c");
        assert_eq!(format_chaos(1500.0), "1.5k c");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(0.875), "87.5%");
        assert_eq!(format_pct(1.0), "100.0%");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(None), "fresh");
        assert_eq!(format_age(Some(Duration::ZERO)), "fresh");
        assert_eq!(format_age(Some(Duration::from_secs(42))), "42s ago");
        assert_eq!(format_age(Some(Duration::from_secs(185))), "3m ago");
    }

    #[test]
    fn test_price_tiers() {
        assert_eq!(PriceTier::of(50.0), PriceTier::High);
        assert_eq!(PriceTier::of(49.9), PriceTier::Mid);
        assert_eq!(PriceTier::of(10.0), PriceTier::Mid);
        assert_eq!(PriceTier::of(0.0).label(), "low");
    }
}
