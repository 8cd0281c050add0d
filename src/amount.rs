//! Locale-aware amount parsing.
//!
//! Bank exports write amounts with either a comma or a point as the decimal
//! mark, sometimes with grouping characters in between. Everything is turned
//! into an exact [`Decimal`]; binary floats never touch an amount.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Decimal mark used by a source file or by the active locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecimalSeparator {
    /// `1.234,56`
    Comma,
    /// `1,234.56`
    #[default]
    Point,
}

impl DecimalSeparator {
    /// The separator character itself.
    pub fn as_char(&self) -> char {
        match self {
            DecimalSeparator::Comma => ',',
            DecimalSeparator::Point => '.',
        }
    }

    /// The character used for digit grouping under this convention.
    pub fn grouping(&self) -> char {
        match self {
            DecimalSeparator::Comma => '.',
            DecimalSeparator::Point => ',',
        }
    }
}

impl TryFrom<char> for DecimalSeparator {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            ',' => Ok(DecimalSeparator::Comma),
            '.' => Ok(DecimalSeparator::Point),
            other => Err(Error::InvalidSeparator(other)),
        }
    }
}

/// Parses amount strings into exact decimals.
///
/// The locale separator is passed in explicitly instead of being read from
/// the process environment, so the same input always yields the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountParser {
    locale: DecimalSeparator,
}

impl AmountParser {
    /// Create a parser for the given locale decimal separator.
    pub fn new(locale: DecimalSeparator) -> Self {
        Self { locale }
    }

    /// Parse `raw`, written with `source` as its decimal mark.
    ///
    /// When `source` matches the locale and `raw` is a plain literal it is
    /// read directly. Otherwise grouping characters are dropped, the source
    /// mark becomes a point, and only the last point is kept as the decimal
    /// mark. A space counts as grouping only in front of a three-digit group.
    /// What remains must be an optional sign, digits and an optional
    /// fraction; anything else is [`Error::MalformedAmount`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gnucash_converter::amount::{AmountParser, DecimalSeparator};
    ///
    /// let parser = AmountParser::new(DecimalSeparator::Point);
    /// let amount = parser.parse("-1.234,56", DecimalSeparator::Comma)?;
    /// assert_eq!(amount.to_string(), "-1234.56");
    /// # Ok::<(), gnucash_converter::Error>(())
    /// ```
    pub fn parse(&self, raw: &str, source: DecimalSeparator) -> Result<Decimal> {
        let trimmed = raw.trim();

        let literal = if source == self.locale && is_plain_literal(trimmed, source) {
            trimmed.replace(source.as_char(), ".")
        } else {
            normalize(trimmed, source)
        };

        if !is_numeric_literal(&literal) {
            return Err(Error::MalformedAmount(raw.to_string()));
        }
        Decimal::from_str(&literal).map_err(|_| Error::MalformedAmount(raw.to_string()))
    }
}

/// `[+-]digits[.digits]`, nothing else.
fn is_numeric_literal(s: &str) -> bool {
    let body = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

/// Whether the space at byte `at` separates a digit from a three-digit group.
fn is_group_space(s: &str, at: usize) -> bool {
    let before = s[..at].chars().next_back();
    let after: Vec<char> = s[at + 1..].chars().take(4).collect();

    before.is_some_and(|c| c.is_ascii_digit())
        && after.len() >= 3
        && after[..3].iter().all(char::is_ascii_digit)
        && after.get(3).map_or(true, |c| !c.is_ascii_digit())
}

fn is_plain_literal(s: &str, source: DecimalSeparator) -> bool {
    !s.contains(source.grouping())
        && s.matches(source.as_char()).count() <= 1
        && !s.contains(char::is_whitespace)
}

fn normalize(s: &str, source: DecimalSeparator) -> String {
    let grouping = source.grouping();
    let mark = source.as_char();

    let pointed: String = s
        .char_indices()
        .filter(|&(at, c)| c != grouping && !(c == ' ' && is_group_space(s, at)))
        .map(|(_, c)| if c == mark { '.' } else { c })
        .collect();

    // Only the final point is the decimal mark
    match pointed.rfind('.') {
        Some(last) => {
            let (head, tail) = pointed.split_at(last);
            let mut out = head.replace('.', "");
            out.push_str(tail);
            out
        }
        None => pointed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Render a value the way a bank export would, with optional grouping.
    fn render(value: Decimal, sep: DecimalSeparator, grouped: bool) -> String {
        let plain = value.abs().to_string();
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (plain.clone(), None),
        };

        let int_part = if grouped {
            let digits: Vec<char> = int_part.chars().collect();
            let mut out = String::new();
            for (i, c) in digits.iter().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(sep.grouping());
                }
                out.push(*c);
            }
            out
        } else {
            int_part
        };

        let mut out = String::new();
        if value.is_sign_negative() && !value.is_zero() {
            out.push('-');
        }
        out.push_str(&int_part);
        if let Some(f) = frac_part {
            out.push(sep.as_char());
            out.push_str(&f);
        }
        out
    }

    #[rstest]
    #[case("12,34", DecimalSeparator::Comma, "12.34")]
    #[case("-5,00", DecimalSeparator::Comma, "-5.00")]
    #[case("+12,34", DecimalSeparator::Comma, "12.34")]
    #[case("0,00", DecimalSeparator::Comma, "0.00")]
    #[case("1.234,56", DecimalSeparator::Comma, "1234.56")]
    #[case("1.234.567,89", DecimalSeparator::Comma, "1234567.89")]
    #[case("1,234,56", DecimalSeparator::Comma, "1234.56")]
    #[case(" 1 234,50 ", DecimalSeparator::Comma, "1234.50")]
    #[case("-1 234 567,00", DecimalSeparator::Comma, "-1234567.00")]
    #[case("12.34", DecimalSeparator::Point, "12.34")]
    #[case("1,234.56", DecimalSeparator::Point, "1234.56")]
    #[case("-1,234,567.89", DecimalSeparator::Point, "-1234567.89")]
    #[case("1.234.56", DecimalSeparator::Point, "1234.56")]
    #[case("100", DecimalSeparator::Point, "100")]
    fn test_parse_amount(#[case] raw: &str, #[case] source: DecimalSeparator, #[case] expected: &str) {
        for locale in [DecimalSeparator::Comma, DecimalSeparator::Point] {
            let parsed = AmountParser::new(locale).parse(raw, source).unwrap();
            assert_eq!(parsed, dec(expected), "{raw} with locale {locale:?}");
        }
    }

    #[test]
    fn test_parse_keeps_scale() {
        let parser = AmountParser::default();
        assert_eq!(parser.parse("5,00", DecimalSeparator::Comma).unwrap().to_string(), "5.00");
    }

    #[test]
    fn test_render_then_parse() {
        let values = ["0", "0.01", "-0.50", "12.34", "-5.00", "1234.56", "-9876543.21", "1000000"];
        for value in values.iter().map(|v| dec(v)) {
            for sep in [DecimalSeparator::Comma, DecimalSeparator::Point] {
                for grouped in [false, true] {
                    let text = render(value, sep, grouped);
                    let parsed = AmountParser::new(DecimalSeparator::Point).parse(&text, sep).unwrap();
                    assert_eq!(parsed, value, "round trip of {text}");
                }
            }
        }
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("12,34 EUR")]
    #[case("--5")]
    #[case("1 2")]
    #[case("12 34,00")]
    #[case("1e3")]
    #[case("1_000,00")]
    #[case("12,")]
    #[case("NaN")]
    fn test_parse_malformed(#[case] raw: &str) {
        for locale in [DecimalSeparator::Comma, DecimalSeparator::Point] {
            let err = AmountParser::new(locale).parse(raw, DecimalSeparator::Comma).unwrap_err();
            assert!(matches!(err, Error::MalformedAmount(ref s) if s == raw));
        }
    }

    #[test]
    fn test_separator_from_char() {
        assert_eq!(DecimalSeparator::try_from(',').unwrap(), DecimalSeparator::Comma);
        assert_eq!(DecimalSeparator::try_from('.').unwrap(), DecimalSeparator::Point);
        assert!(matches!(DecimalSeparator::try_from(';'), Err(Error::InvalidSeparator(';'))));
    }
}
