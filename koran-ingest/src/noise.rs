//! Boilerplate removal. Filtering is whole-line: a line touching any marker
//! is dropped entirely, never partially redacted.

use std::sync::LazyLock;

use koran_core::{ExtractConfig, Line};
use regex::Regex;

static PAGE_FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:page|halaman)\s+\d+(?:\s*(?:of|dari|/)\s*\d+)?|\d+\s*/\s*\d+)$")
        .expect("page footer regex")
});

#[derive(Debug, Clone)]
pub struct NoiseFilter {
    markers: Vec<String>,
    tokens: Vec<String>,
}

impl NoiseFilter {
    pub fn new<M, T>(markers: M, tokens: T) -> Self
    where
        M: IntoIterator,
        M::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let norm = |s: &str| s.trim().to_lowercase();
        Self {
            markers: markers
                .into_iter()
                .map(|m| norm(m.as_ref()))
                .filter(|m| !m.is_empty())
                .collect(),
            tokens: tokens.into_iter().map(|t| norm(t.as_ref())).collect(),
        }
    }

    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(&config.noise_markers, &config.noise_tokens)
    }

    pub fn is_noise(&self, text: &str) -> bool {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();

        if self.markers.iter().any(|m| lower.contains(m.as_str())) {
            return true;
        }
        if self.tokens.iter().any(|t| *t == lower) {
            return true;
        }
        PAGE_FOOTER.is_match(trimmed)
    }

    /// Keep the non-boilerplate lines, in order.
    pub fn filter(&self, lines: Vec<Line>) -> Vec<Line> {
        lines.into_iter().filter(|l| !self.is_noise(&l.text)).collect()
    }
}
