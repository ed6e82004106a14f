//! Locale-aware amount parsing and display.
//!
//! Statements print amounts as `100.000,00` (dot thousands, comma decimal).
//! Each `NumericLocale` defines exactly one grammar; there is no guessing
//! between conventions.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{KoranError, Result};

/// Which characters separate thousands and decimals in amount tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLocale", into = "RawLocale")]
pub struct NumericLocale {
    thousands: char,
    decimal: char,
}

impl NumericLocale {
    /// `1.234.567,89`
    pub const INDONESIAN: NumericLocale = NumericLocale {
        thousands: '.',
        decimal: ',',
    };

    /// `1,234,567.89`
    pub const ENGLISH: NumericLocale = NumericLocale {
        thousands: ',',
        decimal: '.',
    };

    pub fn new(thousands: char, decimal: char) -> Result<Self> {
        let bad = |c: char| c.is_ascii_digit() || c == '-' || c.is_whitespace();
        if thousands == decimal || bad(thousands) || bad(decimal) {
            return Err(KoranError::InvalidLocale { thousands, decimal });
        }
        Ok(Self { thousands, decimal })
    }

    pub fn thousands(&self) -> char {
        self.thousands
    }

    pub fn decimal(&self) -> char {
        self.decimal
    }
}

impl Default for NumericLocale {
    fn default() -> Self {
        Self::INDONESIAN
    }
}

#[derive(Serialize, Deserialize)]
struct RawLocale {
    thousands: char,
    decimal: char,
}

impl TryFrom<RawLocale> for NumericLocale {
    type Error = KoranError;

    fn try_from(raw: RawLocale) -> Result<Self> {
        NumericLocale::new(raw.thousands, raw.decimal)
    }
}

impl From<NumericLocale> for RawLocale {
    fn from(locale: NumericLocale) -> Self {
        RawLocale {
            thousands: locale.thousands,
            decimal: locale.decimal,
        }
    }
}

/// Parse a locale-formatted amount token.
///
/// Returns `None` for empty tokens, a bare `-`, or anything that does not
/// reduce to digits with at most one decimal point. Zero in any spelling
/// (`0`, `0,00`, `0.00` under dot-thousands) is `Some(0)`.
pub fn parse_amount(token: &str, locale: &NumericLocale) -> Option<Decimal> {
    let token = token.trim();
    if token.is_empty() || token == "-" {
        return None;
    }

    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    let mut canonical = String::with_capacity(body.len() + 1);
    if negative {
        canonical.push('-');
    }
    let mut seen_decimal = false;
    for c in body.chars() {
        if c == locale.thousands {
            continue;
        }
        if c == locale.decimal {
            if seen_decimal {
                return None;
            }
            seen_decimal = true;
            canonical.push('.');
        } else if c.is_ascii_digit() {
            canonical.push(c);
        } else {
            return None;
        }
    }

    if !canonical.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if canonical.ends_with('.') {
        canonical.pop();
    }

    Decimal::from_str(&canonical).ok()
}

/// Render an amount for display: two decimals, the locale's decimal
/// separator, no thousands grouping.
pub fn format_amount(value: Decimal, locale: &NumericLocale) -> String {
    let text = format!("{:.2}", value.round_dp(2));
    if locale.decimal == '.' {
        text
    } else {
        text.replace('.', &locale.decimal.to_string())
    }
}

/// Return the amount token a whitespace-delimited word holds, if any.
///
/// Grammar: optional `-`, a digit, then digits and separators. Trailing
/// separator punctuation (`2024,`) is ignored.
pub fn amount_token(word: &str) -> Option<&str> {
    let word = word.trim_end_matches(['.', ',', ';', ':']);
    let body = word.strip_prefix('-').unwrap_or(word);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => {}
        _ => return None,
    }
    if chars.all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        Some(word)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_indonesian_amounts() {
        let id = NumericLocale::INDONESIAN;
        assert_eq!(parse_amount("100.000,00", &id), Some(dec("100000.00")));
        assert_eq!(parse_amount("5.000.000,00", &id), Some(dec("5000000")));
        assert_eq!(parse_amount("-1.250,50", &id), Some(dec("-1250.50")));
        assert_eq!(parse_amount("1.234", &id), Some(dec("1234")));
    }

    #[test]
    fn test_parse_english_amounts() {
        let en = NumericLocale::ENGLISH;
        assert_eq!(parse_amount("1,000,000.00", &en), Some(dec("1000000")));
        assert_eq!(parse_amount("0.50", &en), Some(dec("0.5")));
    }

    #[test]
    fn test_zero_spellings_are_zero_not_absent() {
        let id = NumericLocale::INDONESIAN;
        for token in ["0", "0,00", "0.00"] {
            assert_eq!(parse_amount(token, &id), Some(Decimal::ZERO), "{token}");
        }
    }

    #[test]
    fn test_unparsable_tokens() {
        let id = NumericLocale::INDONESIAN;
        assert_eq!(parse_amount("", &id), None);
        assert_eq!(parse_amount("-", &id), None);
        assert_eq!(parse_amount("1,2,3", &id), None);
        assert_eq!(parse_amount("12a", &id), None);
        assert_eq!(parse_amount("--5", &id), None);
        assert_eq!(parse_amount(".", &id), None);
    }

    #[test]
    fn test_format_uses_decimal_comma_without_grouping() {
        let id = NumericLocale::INDONESIAN;
        assert_eq!(format_amount(dec("5000000"), &id), "5000000,00");
        assert_eq!(format_amount(dec("-1250.5"), &id), "-1250,50");
        assert_eq!(format_amount(dec("0.125"), &NumericLocale::ENGLISH), "0.12");
    }

    #[test]
    fn test_format_then_parse_keeps_value() {
        let id = NumericLocale::INDONESIAN;
        for token in ["100.000,00", "0,00", "-7,25", "12.345.678,90"] {
            let value = parse_amount(token, &id).unwrap();
            let shown = format_amount(value, &id);
            assert_eq!(parse_amount(&shown, &id), Some(value), "{token} -> {shown}");
        }
    }

    #[test]
    fn test_amount_token_grammar() {
        assert_eq!(amount_token("100.000,00"), Some("100.000,00"));
        assert_eq!(amount_token("2024,"), Some("2024"));
        assert_eq!(amount_token("-15,00"), Some("-15,00"));
        assert_eq!(amount_token("-"), None);
        assert_eq!(amount_token("Rp100"), None);
        assert_eq!(amount_token("09:15:00"), None);
    }

    #[test]
    fn test_locale_validation() {
        assert!(NumericLocale::new('.', '.').is_err());
        assert!(NumericLocale::new('1', ',').is_err());
        assert!(NumericLocale::new(' ', ',').is_err());
        assert_eq!(NumericLocale::new(',', '.').unwrap(), NumericLocale::ENGLISH);
    }
}
