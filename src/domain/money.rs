use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For XOF/EUR-style amounts, 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a human-readable currency string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
/// More than two decimal digits are truncated.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, decimals_str) = match input.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (input, ""),
    };
    if decimals_str.contains('.') {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else if units_str.contains('-') {
        // The sign was already consumed above
        return Err(ParseCentsError::InvalidFormat);
    } else {
        units_str.parse().map_err(|_| ParseCentsError::InvalidFormat)?
    };

    // Keep at most two decimal digits; extra digits are dropped
    let decimals: String = decimals_str.chars().take(2).collect();
    let decimal_cents: i64 = match decimals.len() {
        0 => 0,
        1 => {
            // Single digit like "5" means 50 cents
            decimals
                .parse::<i64>()
                .map_err(|_| ParseCentsError::InvalidFormat)?
                * 10
        }
        _ => decimals.parse().map_err(|_| ParseCentsError::InvalidFormat)?,
    };

    let cents = units * 100 + decimal_cents;
    Ok(if negative { -cents } else { cents })
}

/// Apply a percentage rate to an amount, rounding to the nearest cent with
/// ties away from zero. Works for negative amounts: the result keeps the
/// sign of the input.
pub fn apply_rate(amount: Cents, rate_percent: i64) -> Cents {
    let scaled = amount * rate_percent;
    let quotient = scaled / 100;
    let remainder = scaled % 100;
    if remainder.abs() * 2 >= 100 {
        quotient + scaled.signum()
    } else {
        quotient
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.34"), Ok(1234));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents("0.01"), Ok(1));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents("100.999"), Ok(10099)); // Truncates
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("12.34.56").is_err());
        assert!(parse_cents("12,34").is_err());
        assert!(parse_cents("--5").is_err());
    }

    #[test]
    fn test_apply_rate_exact() {
        assert_eq!(apply_rate(12000, 18), 2160);
        assert_eq!(apply_rate(12000, 5), 600);
        assert_eq!(apply_rate(10000, 20), 2000);
        assert_eq!(apply_rate(0, 18), 0);
    }

    #[test]
    fn test_apply_rate_rounds_to_nearest_cent() {
        // 3 cents at 18% = 0.54 cents, rounds up to 1
        assert_eq!(apply_rate(3, 18), 1);
        // 1 cent at 18% = 0.18 cents, rounds down to 0
        assert_eq!(apply_rate(1, 18), 0);
        // 50 cents at 5% = 2.5 cents, ties round away from zero
        assert_eq!(apply_rate(50, 5), 3);
    }

    #[test]
    fn test_apply_rate_negative_amounts() {
        assert_eq!(apply_rate(-12000, 18), -2160);
        assert_eq!(apply_rate(-3, 18), -1);
        assert_eq!(apply_rate(-50, 5), -3);
    }
}
