use std::collections::HashMap;

/// Rounds a money amount to the 2-decimal storage/display convention.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds an exchange rate to 6 decimals.
///
/// Rates deliberately carry more precision than money amounts so that
/// converting and rounding stays reproducible.
#[must_use]
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Implied cross rate between two currencies from their rates to base.
///
/// Returns `rates[from] / rates[to]` rounded to 6 decimals. The identity
/// pair is pinned to `1` regardless of the cache contents. Returns `None`
/// when either rate is missing or the ratio is not a finite positive
/// number, so callers can leave the current field value untouched.
#[must_use]
pub fn cross_rate(rates: &HashMap<String, f64>, from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(1.0);
    }

    let from_rate = *rates.get(from)?;
    let to_rate = *rates.get(to)?;
    let ratio = from_rate / to_rate;
    if !ratio.is_finite() || ratio <= 0.0 {
        return None;
    }
    Some(round6(ratio))
}

/// Converts an amount with the 2-decimal money convention.
#[must_use]
pub fn convert(amount: f64, rate: f64) -> f64 {
    round2(amount * rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> HashMap<String, f64> {
        HashMap::from([
            ("USD".to_string(), 1.0),
            ("EUR".to_string(), 0.9),
            ("TRY".to_string(), 32.5),
            ("XXX".to_string(), 0.0),
        ])
    }

    #[test]
    fn identity_pair_is_pinned_to_one() {
        assert_eq!(cross_rate(&rates(), "USD", "USD"), Some(1.0));
        // Pinned even when the code is not cached at all.
        assert_eq!(cross_rate(&HashMap::new(), "ZZZ", "ZZZ"), Some(1.0));
    }

    #[test]
    fn cross_rate_is_ratio_of_rates_to_base() {
        assert_eq!(cross_rate(&rates(), "USD", "EUR"), Some(1.111111));
        assert_eq!(cross_rate(&rates(), "EUR", "USD"), Some(0.9));
        assert_eq!(cross_rate(&rates(), "TRY", "USD"), Some(32.5));
    }

    #[test]
    fn missing_or_degenerate_rates_yield_none() {
        assert_eq!(cross_rate(&rates(), "GBP", "USD"), None);
        assert_eq!(cross_rate(&rates(), "USD", "GBP"), None);
        // Division by a zero rate must not leak infinity into the field.
        assert_eq!(cross_rate(&rates(), "USD", "XXX"), None);
        assert_eq!(cross_rate(&rates(), "XXX", "USD"), None);
    }

    #[test]
    fn convert_applies_two_decimal_rounding() {
        assert_eq!(convert(100.0, 1.111111), 111.11);
        assert_eq!(convert(200.0, 0.95), 190.0);
        assert_eq!(convert(-50.0, 0.9), -45.0);
        assert_eq!(convert(100.0, 0.333333), 33.33);
    }
}
