use crate::error::{AppError, Result};

/// Validated price brackets: strictly ascending boundary values plus the
/// currency symbol used in folder names.
///
/// Boundaries define half-open intervals `(prev, b]` starting at 0, with
/// an unbounded top interval above the last boundary. A price exactly on
/// a boundary belongs to the interval that boundary closes, so a €10
/// record with boundaries `[10, 25]` lands in "€0 - €10".
#[derive(Debug, Clone)]
pub struct BracketSpec {
    boundaries: Vec<f64>,
    symbol: String,
}

impl BracketSpec {
    /// Parse a comma-separated boundary list (e.g. "10,25,50,100,250").
    /// Rejects anything non-numeric, non-finite or negative up front so
    /// classification can never fail mid-run; duplicates collapse and the
    /// result is sorted ascending.
    pub fn parse(input: &str, symbol: &str) -> Result<Self> {
        let mut boundaries = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let value: f64 = part.parse().map_err(|_| {
                AppError::Config(format!(
                    "Invalid bracket boundary '{}': expected a comma-separated list of numbers",
                    part
                ))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Config(format!(
                    "Invalid bracket boundary '{}': must be a non-negative number",
                    part
                )));
            }
            boundaries.push(value);
        }

        if boundaries.is_empty() {
            return Err(AppError::Config(
                "At least one bracket boundary is required".to_string(),
            ));
        }

        boundaries.sort_by(|a, b| a.total_cmp(b));
        boundaries.dedup();

        Ok(Self {
            boundaries,
            symbol: symbol.to_string(),
        })
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Map a price to its bracket's folder name. Total for any `price >= 0`.
    pub fn classify(&self, price: f64) -> String {
        let mut lower = 0.0;
        for &boundary in &self.boundaries {
            if price <= boundary {
                return format!(
                    "{}{} - {}{}",
                    self.symbol,
                    format_amount(lower),
                    self.symbol,
                    format_amount(boundary)
                );
            }
            lower = boundary;
        }
        format!("> {}{}", self.symbol, format_amount(lower))
    }

    /// Index of the bracket containing `price`, counting the open top
    /// interval as `boundaries.len()`.
    pub fn bracket_index(&self, price: f64) -> usize {
        self.boundaries
            .iter()
            .position(|&b| price <= b)
            .unwrap_or(self.boundaries.len())
    }
}

/// Render a boundary without trailing ".0" noise for whole amounts.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(input: &str) -> BracketSpec {
        BracketSpec::parse(input, "€").unwrap()
    }

    #[test]
    fn test_classify_basic_intervals() {
        let brackets = spec("10,25,50");
        assert_eq!(brackets.classify(5.0), "€0 - €10");
        assert_eq!(brackets.classify(30.0), "€25 - €50");
        assert_eq!(brackets.classify(51.0), "> €50");
    }

    #[test]
    fn test_boundary_price_belongs_to_lower_interval() {
        let brackets = spec("10,25");
        assert_eq!(brackets.classify(10.0), "€0 - €10");
        assert_eq!(brackets.classify(25.0), "€10 - €25");
        assert_eq!(brackets.classify(10.01), "€10 - €25");
    }

    #[test]
    fn test_classify_is_monotonic() {
        let brackets = spec("10,25,50,100,250");
        let prices = [0.0, 0.5, 9.99, 10.0, 10.01, 25.0, 77.0, 250.0, 251.0, 10_000.0];
        for window in prices.windows(2) {
            assert!(
                brackets.bracket_index(window[0]) <= brackets.bracket_index(window[1]),
                "bracket index decreased between {} and {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_classify_zero_and_top() {
        let brackets = spec("10");
        assert_eq!(brackets.classify(0.0), "€0 - €10");
        assert_eq!(brackets.classify(1_000_000.0), "> €10");
    }

    #[test]
    fn test_fractional_boundaries_keep_decimals() {
        let brackets = spec("7.5,20");
        assert_eq!(brackets.classify(5.0), "€0 - €7.5");
        assert_eq!(brackets.classify(8.0), "€7.5 - €20");
    }

    #[test]
    fn test_parse_sorts_and_dedups() {
        let brackets = spec("50, 10, 25, 10");
        assert_eq!(brackets.boundaries(), &[10.0, 25.0, 50.0]);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(BracketSpec::parse("10,abc,50", "€").is_err());
        assert!(BracketSpec::parse("", "€").is_err());
        assert!(BracketSpec::parse("10,-5", "€").is_err());
    }
}
