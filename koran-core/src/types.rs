use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::{NumericLocale, format_amount};

/// One positioned piece of text as extracted from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// A page as handed over by the ingestion side. Either representation may
/// be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub fragments: Vec<TextFragment>,
    #[serde(default)]
    pub plain_text: String,
}

impl Page {
    pub fn from_fragments(fragments: Vec<TextFragment>) -> Self {
        Self {
            fragments,
            plain_text: String::new(),
        }
    }

    pub fn from_plain_text(text: impl Into<String>) -> Self {
        Self {
            fragments: Vec::new(),
            plain_text: text.into(),
        }
    }

    pub fn with_plain_text(mut self, text: impl Into<String>) -> Self {
        self.plain_text = text.into();
        self
    }

    pub fn is_blank(&self) -> bool {
        self.fragments.iter().all(|f| f.text.trim().is_empty()) && self.plain_text.trim().is_empty()
    }
}

/// A whole statement: pages in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementDocument {
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// A reconstructed horizontal row of fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Vertical position, snapped to the clustering bucket.
    pub y: f64,
    pub text: String,
}

/// Account number and currency attached to every record of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMetadata {
    pub account_number: String,
    pub currency: String,
}

impl AccountMetadata {
    pub const DEFAULT_CURRENCY: &'static str = "IDR";

    pub fn with_currency(currency: impl Into<String>) -> Self {
        Self {
            account_number: String::new(),
            currency: currency.into(),
        }
    }
}

impl Default for AccountMetadata {
    fn default() -> Self {
        Self::with_currency(Self::DEFAULT_CURRENCY)
    }
}

/// A finished transaction. Never mutated once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub account_number: String,
    /// Date as printed, `DD MMM YYYY`.
    pub date: String,
    pub time: Option<String>,
    pub description: String,
    pub reference: Option<String>,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub balance: Option<Decimal>,
    pub currency: String,
    /// Balance of the first record of the document, copied into every record.
    pub opening_balance: Option<Decimal>,
}

/// Locale-formatted amounts for export; empty strings stand for absent values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDisplay {
    pub debit: String,
    pub credit: String,
    pub balance: String,
    pub opening_balance: String,
}

impl Record {
    /// Parse `date` into a calendar date. Month abbreviations may be
    /// English or Indonesian (`Mei`, `Agu`, `Okt`, `Des`).
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_statement_date(&self.date)
    }

    pub fn display(&self, locale: &NumericLocale) -> RecordDisplay {
        let show = |v: Option<Decimal>| v.map(|v| format_amount(v, locale)).unwrap_or_default();
        RecordDisplay {
            debit: show(self.debit),
            credit: show(self.credit),
            balance: show(self.balance),
            opening_balance: show(self.opening_balance),
        }
    }
}

/// Parse `DD MMM YYYY`, e.g. `05 Jan 2024` or `17 Agu 2024`.
pub fn parse_statement_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<_> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month = month_number(parts[1])?;
    let year: i32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(abbrev: &str) -> Option<u32> {
    let m = match abbrev.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" | "peb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" | "mei" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" | "agu" | "ags" => 8,
        "sep" => 9,
        "oct" | "okt" => 10,
        "nov" => 11,
        "dec" | "des" => 12,
        _ => return None,
    };
    Some(m)
}
