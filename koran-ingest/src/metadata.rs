//! Account number and currency from page headers.
//!
//! Every page is scanned and a later match overwrites an earlier one, so the
//! value attached to records is the last one seen in document order.

use std::sync::LazyLock;

use koran_core::{AccountMetadata, Line};
use regex::Regex;

static ACCOUNT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{10,16})(?:[^0-9]|$)").expect("account number regex")
});

static CURRENCY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:currency|mata\s+uang)\s*:\s*([a-z]{3})\b").expect("currency regex")
});

#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    metadata: AccountMetadata,
    found: bool,
}

impl MetadataExtractor {
    pub fn new(default_currency: &str) -> Self {
        Self {
            metadata: AccountMetadata::with_currency(default_currency),
            found: false,
        }
    }

    /// Scan one page. Plain text is preferred; the reconstructed lines stand
    /// in when the page has none.
    pub fn scan_page(&mut self, plain_text: &str, lines: &[Line]) {
        if plain_text.trim().is_empty() {
            let joined = lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            self.scan_text(&joined);
        } else {
            self.scan_text(plain_text);
        }
    }

    pub fn scan_text(&mut self, text: &str) {
        if let Some(caps) = ACCOUNT_NUMBER.captures(text) {
            self.metadata.account_number = caps[1].to_string();
            self.found = true;
        }
        if let Some(caps) = CURRENCY_LABEL.captures(text) {
            self.metadata.currency = caps[1].to_ascii_uppercase();
        }
    }

    pub fn found(&self) -> bool {
        self.found
    }

    pub fn metadata(&self) -> &AccountMetadata {
        &self.metadata
    }

    pub fn finish(self) -> AccountMetadata {
        self.metadata
    }
}
