//! Numeric normalization utilities.

/// Characters and tokens that decorate prices on Korean and global storefronts.
const CURRENCY_MARKS: &[&str] = &["KRW", "USD", "₩", "￦", "$", "원"];

/// Parses a number, tolerating thousands separators and surrounding whitespace.
///
/// Returns `None` for empty, non-numeric, or non-finite input.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

/// Reason a price string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    NotNumeric,
    Negative,
    OutOfRange,
}

impl PriceError {
    pub fn reason(self) -> &'static str {
        match self {
            Self::NotNumeric => "not a numeric amount",
            Self::Negative => "negative amount",
            Self::OutOfRange => "amount out of range",
        }
    }
}

/// Parses a price into the smallest currency unit.
///
/// Currency symbols (`₩`, `$`, `원`, `KRW`) are stripped. Fractional amounts
/// are rounded half away from zero.
pub fn parse_price(value: &str) -> Result<i64, PriceError> {
    let mut text = value.trim().to_uppercase();
    for mark in CURRENCY_MARKS {
        text = text.replace(mark, "");
    }
    let amount = parse_number(&text).ok_or(PriceError::NotNumeric)?;
    price_from_f64(amount)
}

/// Validates and rounds an already-numeric price.
pub fn price_from_f64(amount: f64) -> Result<i64, PriceError> {
    if !amount.is_finite() {
        return Err(PriceError::NotNumeric);
    }
    if amount < 0.0 {
        return Err(PriceError::Negative);
    }
    let rounded = amount.round();
    // `i64::MAX as f64` is 2^63, one past the largest representable amount.
    if rounded >= i64::MAX as f64 {
        return Err(PriceError::OutOfRange);
    }
    Ok(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_grouped_numbers() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" 1,234.5 "), Some(1234.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn parses_decorated_prices() {
        assert_eq!(parse_price("15000"), Ok(15000));
        assert_eq!(parse_price("15,000원"), Ok(15000));
        assert_eq!(parse_price("₩ 29,900"), Ok(29900));
        assert_eq!(parse_price("KRW 1000"), Ok(1000));
        assert_eq!(parse_price("krw 1000"), Ok(1000));
        assert_eq!(parse_price("99.5"), Ok(100));
        assert_eq!(parse_price("0"), Ok(0));
    }

    #[test]
    fn rejects_bad_prices() {
        assert_eq!(parse_price("-5"), Err(PriceError::Negative));
        assert_eq!(parse_price("free"), Err(PriceError::NotNumeric));
        assert_eq!(parse_price("원"), Err(PriceError::NotNumeric));
        assert_eq!(price_from_f64(1e300), Err(PriceError::OutOfRange));
        assert_eq!(
            price_from_f64(9_223_372_036_854_775_808.0),
            Err(PriceError::OutOfRange)
        );
        assert_eq!(
            price_from_f64(9_223_372_036_854_774_784.0),
            Ok(9_223_372_036_854_774_784)
        );
    }
}
