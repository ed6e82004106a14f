//! Whole-document extraction: pages in order through line reconstruction,
//! noise filtering, segmentation, and record building.
//!
//! A document is processed strictly page by page because the segmenter
//! carries state across page breaks. Separate documents share nothing and
//! can be processed independently.

use koran_core::{AccountMetadata, ExtractConfig, Line, Page, Record, Result, StatementDocument};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::builder::RecordBuilder;
use crate::diagnostics::Diagnostics;
use crate::lines::{plain_text_lines, reconstruct_lines};
use crate::metadata::MetadataExtractor;
use crate::noise::NoiseFilter;
use crate::segmenter::{LinePatterns, Segmenter};

/// Output of one document run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub metadata: AccountMetadata,
    pub diagnostics: Diagnostics,
}

/// A configured extractor, reusable across documents.
#[derive(Debug, Clone)]
pub struct StatementExtractor {
    config: ExtractConfig,
    noise: NoiseFilter,
    patterns: LinePatterns,
}

impl StatementExtractor {
    pub fn new(config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        let noise = NoiseFilter::from_config(&config);
        let patterns = LinePatterns::new(&config)?;
        Ok(Self {
            config,
            noise,
            patterns,
        })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// The ordered lines a page contributes, before noise filtering.
    pub fn page_lines(&self, page: &Page) -> Vec<Line> {
        if !page.fragments.is_empty() {
            reconstruct_lines(&page.fragments, self.config.line_cluster_tolerance)
        } else if self.config.plain_text_fallback {
            plain_text_lines(&page.plain_text)
        } else {
            Vec::new()
        }
    }

    pub fn extract(&self, pages: &[Page]) -> Extraction {
        let mut segmenter = Segmenter::new(&self.patterns, &self.config);
        let mut metadata = MetadataExtractor::new(&self.config.default_currency);
        let mut builder = RecordBuilder::new();
        let mut blocks = Vec::new();
        let mut lines_seen = 0;
        let mut noise_lines = 0;

        for (index, page) in pages.iter().enumerate() {
            let lines = self.page_lines(page);
            metadata.scan_page(&page.plain_text, &lines);

            let total = lines.len();
            let kept = self.noise.filter(lines);
            lines_seen += total;
            noise_lines += total - kept.len();
            debug!(
                page = index + 1,
                lines = total,
                kept = kept.len(),
                "segmenting page"
            );

            for line in &kept {
                segmenter.push_line(&line.text, &mut blocks);
            }
            segmenter.finish_page(&mut blocks);

            for block in blocks.drain(..) {
                builder.push(block);
            }
        }

        let metadata_found = metadata.found();
        if !metadata_found && !pages.is_empty() {
            warn!("no account number found in document");
        }
        let metadata = metadata.finish();
        let records = builder.finish(&metadata);

        let mut diagnostics = segmenter.into_diagnostics();
        diagnostics.pages = pages.len();
        diagnostics.lines = lines_seen;
        diagnostics.noise_lines = noise_lines;
        diagnostics.records = records.len();
        diagnostics.metadata_found = metadata_found;

        info!(
            pages = diagnostics.pages,
            records = diagnostics.records,
            incomplete = diagnostics.incomplete_blocks,
            orphans = diagnostics.orphan_amount_lines,
            "statement extracted"
        );

        Extraction {
            records,
            metadata,
            diagnostics,
        }
    }

    pub fn extract_document(&self, document: &StatementDocument) -> Extraction {
        self.extract(&document.pages)
    }

    /// Independent runs over several documents, in input order.
    pub fn extract_all<'d, I>(&self, documents: I) -> Vec<Extraction>
    where
        I: IntoIterator<Item = &'d StatementDocument>,
    {
        documents
            .into_iter()
            .map(|doc| self.extract_document(doc))
            .collect()
    }
}

/// One-shot extraction with a given config.
pub fn extract_pages(pages: &[Page], config: ExtractConfig) -> Result<Extraction> {
    Ok(StatementExtractor::new(config)?.extract(pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use koran_core::TextFragment;

    fn row(y: f64, cells: &[(&str, f64)]) -> Vec<TextFragment> {
        cells
            .iter()
            .map(|(text, x)| TextFragment::new(*text, *x, y))
            .collect()
    }

    #[test]
    fn test_fragments_to_records() {
        let mut fragments = Vec::new();
        fragments.extend(row(10.0, &[("Rekening", 10.0), ("Koran", 60.0)]));
        fragments.extend(row(20.0, &[("05 Jan 2024", 10.0)]));
        fragments.extend(row(30.0, &[("Transfer", 10.0), ("out", 60.0)]));
        fragments.extend(row(
            40.0,
            &[("10.000,00", 300.0), ("0,00", 380.0), ("90.000,00", 460.0)],
        ));
        let page = Page::from_fragments(fragments).with_plain_text("Account 1370012345678");

        let extractor = StatementExtractor::new(ExtractConfig::default()).unwrap();
        let out = extractor.extract(&[page]);

        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].description, "Transfer out");
        assert_eq!(out.records[0].account_number, "1370012345678");
        assert_eq!(out.diagnostics.lines, 4);
        assert_eq!(out.diagnostics.noise_lines, 1);
        assert!(out.diagnostics.metadata_found);
    }

    #[test]
    fn test_plain_text_only_page_contributes_nothing_by_default() {
        let page = Page::from_plain_text("05 Jan 2024\nTransfer\n1,00 0,00 1,00");
        let out = extract_pages(std::slice::from_ref(&page), ExtractConfig::default()).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.diagnostics.lines, 0);

        let config = ExtractConfig {
            plain_text_fallback: true,
            ..ExtractConfig::default()
        };
        let out = extract_pages(&[page], config).unwrap();
        assert_eq!(out.records.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractConfig {
            line_cluster_tolerance: -1.0,
            ..ExtractConfig::default()
        };
        assert!(StatementExtractor::new(config).is_err());
    }

    #[test]
    fn test_documents_are_independent() {
        let doc = |balance: &str| StatementDocument {
            pages: vec![Page::from_plain_text(format!(
                "Acct 1234567890\n05 Jan 2024\nFee\n1,00 0,00 {balance}"
            ))],
        };
        let config = ExtractConfig {
            plain_text_fallback: true,
            ..ExtractConfig::default()
        };
        let extractor = StatementExtractor::new(config).unwrap();
        let docs = [doc("10,00"), doc("20,00")];
        let outs = extractor.extract_all(&docs);
        assert_eq!(outs.len(), 2);
        assert_ne!(outs[0].records[0].opening_balance, outs[1].records[0].opening_balance);
    }
}
