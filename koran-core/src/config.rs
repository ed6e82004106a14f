//! Extraction settings. Every field has a default tuned for the
//! rekening-koran layout, so an empty TOML table is a valid config.

use serde::{Deserialize, Serialize};

use crate::amount::NumericLocale;
use crate::error::{KoranError, Result};
use crate::types::AccountMetadata;

/// What to do with an amount line that arrives while no block is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrphanAmountPolicy {
    /// Count it and drop it.
    #[default]
    Discard,
    /// Open a block dated with the last date seen and close it immediately.
    AttachToPriorDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Vertical bucket size used to cluster fragments into lines.
    pub line_cluster_tolerance: f64,
    /// Lowercase substrings marking a whole line as boilerplate.
    pub noise_markers: Vec<String>,
    /// Lowercase lines dropped on exact match.
    pub noise_tokens: Vec<String>,
    pub numeric_locale: NumericLocale,
    pub reference_min_digits: usize,
    /// Attach description lines that follow an amount line to that record.
    pub trailing_description: bool,
    pub orphan_amounts: OrphanAmountPolicy,
    /// Segment a page's plain text when it carries no fragments.
    pub plain_text_fallback: bool,
    pub default_currency: String,
}

pub const DEFAULT_NOISE_MARKERS: &[&str] = &[
    "rekening koran",
    "account statement",
    "e-statement",
    "opening balance",
    "closing balance",
    "saldo awal",
    "saldo akhir",
    "summary",
    "ringkasan",
    "posting date",
    "tanggal posting",
    "for further questions",
    "untuk pertanyaan",
    "currency :",
    "mata uang :",
    "branch :",
    "cabang :",
];

pub const DEFAULT_NOISE_TOKENS: &[&str] = &[
    "idr",
    "debit",
    "credit",
    "kredit",
    "balance",
    "saldo",
    "remarks",
    "keterangan",
    "reference no.",
    "no. referensi",
    "cr",
    "db",
];

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            line_cluster_tolerance: 1.0,
            noise_markers: DEFAULT_NOISE_MARKERS.iter().map(|s| s.to_string()).collect(),
            noise_tokens: DEFAULT_NOISE_TOKENS.iter().map(|s| s.to_string()).collect(),
            numeric_locale: NumericLocale::default(),
            reference_min_digits: 10,
            trailing_description: false,
            orphan_amounts: OrphanAmountPolicy::default(),
            plain_text_fallback: false,
            default_currency: AccountMetadata::DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.line_cluster_tolerance.is_finite() || self.line_cluster_tolerance <= 0.0 {
            return Err(KoranError::InvalidConfig(format!(
                "line_cluster_tolerance must be a positive number, got {}",
                self.line_cluster_tolerance
            )));
        }
        if self.reference_min_digits == 0 {
            return Err(KoranError::InvalidConfig(
                "reference_min_digits must be at least 1".to_string(),
            ));
        }
        if self.default_currency.trim().is_empty() {
            return Err(KoranError::InvalidConfig(
                "default_currency must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
