//! Fixed-point menu prices.
//!
//! Prices are held as an integer number of cents so arithmetic and equality
//! never go through floating point. The textual form always carries exactly
//! two fractional digits (`"2.50"`).

use std::fmt;
use std::str::FromStr;

/// Largest accepted price in cents (`99999999.99`).
pub const MAX_PRICE_CENTS: i64 = 9_999_999_999;

/// Validation errors raised while parsing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceValidationError {
    /// The input was not a plain decimal number.
    #[error("price must be a decimal number")]
    Malformed,
    /// More than two digits followed the decimal point.
    #[error("price must have at most 2 decimal places")]
    TooManyDecimalPlaces,
    /// The price was zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The price exceeded [`MAX_PRICE_CENTS`].
    #[error("price must not exceed 99999999.99")]
    TooLarge,
}

/// Positive price with two decimal places of precision.
///
/// # Examples
/// ```
/// use little_lemon::domain::Price;
///
/// let price: Price = "2.5".parse().expect("valid price");
/// assert_eq!(price.cents(), 250);
/// assert_eq!(price.to_string(), "2.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Build a price from a cent amount, enforcing the positive bounded range.
    pub fn from_cents(cents: i64) -> Result<Self, PriceValidationError> {
        if cents <= 0 {
            return Err(PriceValidationError::NotPositive);
        }
        if cents > MAX_PRICE_CENTS {
            return Err(PriceValidationError::TooLarge);
        }
        Ok(Self(cents))
    }

    /// Amount in cents.
    pub fn cents(self) -> i64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PriceValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(PriceValidationError::Malformed);
        }
        let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(PriceValidationError::Malformed);
        }
        if fraction.len() > 2 {
            return Err(PriceValidationError::TooManyDecimalPlaces);
        }

        let whole_units = whole.trim_start_matches('0');
        // Anything longer than eight whole digits is out of range, and
        // rejecting it here keeps the parse below inside i64.
        if whole_units.len() > 8 {
            return if negative {
                Err(PriceValidationError::NotPositive)
            } else {
                Err(PriceValidationError::TooLarge)
            };
        }
        let units: i64 = if whole_units.is_empty() {
            0
        } else {
            whole_units
                .parse()
                .map_err(|_| PriceValidationError::Malformed)?
        };
        let cents: i64 = format!("{fraction:0<2}")
            .parse()
            .map_err(|_| PriceValidationError::Malformed)?;
        let total = units * 100 + cents;
        if negative && total != 0 {
            return Err(PriceValidationError::NotPositive);
        }
        Self::from_cents(total)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2.50", 250)]
    #[case("2.5", 250)]
    #[case("7", 700)]
    #[case("7.0", 700)]
    #[case("10.49", 1049)]
    #[case(".99", 99)]
    #[case(" 3.10 ", 310)]
    #[case("0099999999.99", MAX_PRICE_CENTS)]
    fn parses_decimal_text(#[case] raw: &str, #[case] cents: i64) {
        let price: Price = raw.parse().expect("valid price");
        assert_eq!(price.cents(), cents);
    }

    #[rstest]
    #[case("0", PriceValidationError::NotPositive)]
    #[case("0.00", PriceValidationError::NotPositive)]
    #[case("-1.00", PriceValidationError::NotPositive)]
    #[case("-0", PriceValidationError::NotPositive)]
    #[case("1.999", PriceValidationError::TooManyDecimalPlaces)]
    #[case("100000000.00", PriceValidationError::TooLarge)]
    #[case("123456789012345678901", PriceValidationError::TooLarge)]
    #[case("", PriceValidationError::Malformed)]
    #[case(".", PriceValidationError::Malformed)]
    #[case("1e2", PriceValidationError::Malformed)]
    #[case("1.2.3", PriceValidationError::Malformed)]
    #[case("abc", PriceValidationError::Malformed)]
    fn rejects_invalid_prices(#[case] raw: &str, #[case] expected: PriceValidationError) {
        assert_eq!(raw.parse::<Price>(), Err(expected));
    }

    #[rstest]
    #[case(250, "2.50")]
    #[case(5, "0.05")]
    #[case(1049, "10.49")]
    #[case(700, "7.00")]
    fn displays_two_decimal_places(#[case] cents: i64, #[case] expected: &str) {
        let price = Price::from_cents(cents).expect("valid cents");
        assert_eq!(price.to_string(), expected);
    }
}
