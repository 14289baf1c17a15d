use crate::FxError;

/// Permissive parse used while the user is mid-edit.
///
/// Accepts `.` or `,` as decimal separator; anything unparsable becomes
/// `0.0` so derived fields can always recompute without surfacing an
/// error. Strictness is deferred to submit time.
#[must_use]
pub fn parse_loose(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Submit-time amount validation: must parse to a finite number > 0.
pub fn parse_positive_amount(raw: &str) -> Result<f64, FxError> {
    let value = parse_loose(raw);
    if value <= 0.0 {
        return Err(FxError::InvalidAmount(raw.trim().to_string()));
    }
    Ok(value)
}

/// Submit-time rate validation: must parse to a finite number > 0.
///
/// A rate of exactly `0` is never a usable conversion factor and blocks
/// submission.
pub fn parse_positive_rate(raw: &str) -> Result<f64, FxError> {
    let value = parse_loose(raw);
    if value <= 0.0 {
        return Err(FxError::InvalidRate(raw.trim().to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_parse_accepts_dot_or_comma() {
        assert_eq!(parse_loose("100"), 100.0);
        assert_eq!(parse_loose(" 10.5 "), 10.5);
        assert_eq!(parse_loose("10,5"), 10.5);
        assert_eq!(parse_loose("-3"), -3.0);
    }

    #[test]
    fn loose_parse_defaults_to_zero() {
        assert_eq!(parse_loose(""), 0.0);
        assert_eq!(parse_loose("abc"), 0.0);
        assert_eq!(parse_loose("1.2.3"), 0.0);
        assert_eq!(parse_loose("NaN"), 0.0);
        assert_eq!(parse_loose("inf"), 0.0);
    }

    #[test]
    fn positive_amount_rejects_zero_negative_and_garbage() {
        assert!(parse_positive_amount("100").is_ok());
        assert_eq!(
            parse_positive_amount("0"),
            Err(FxError::InvalidAmount("0".to_string()))
        );
        assert!(parse_positive_amount("-5").is_err());
        assert!(parse_positive_amount("").is_err());
        assert!(parse_positive_amount("12x").is_err());
    }

    #[test]
    fn positive_rate_rejects_zero() {
        assert_eq!(parse_positive_rate("0.95"), Ok(0.95));
        assert!(parse_positive_rate("0").is_err());
        assert!(parse_positive_rate("").is_err());
    }
}
