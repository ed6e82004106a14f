//! Reading page dumps produced by an upstream text extractor.
//!
//! `.json` files hold a `StatementDocument` (pages of positioned fragments
//! plus optional plain text). Anything else is treated as plain text with
//! form feeds separating pages.

use anyhow::{Context, Result};
use koran_core::{Page, StatementDocument};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Fragments,
    PlainText,
}

impl InputKind {
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputKind::Fragments,
            _ => InputKind::PlainText,
        }
    }
}

pub fn read_document(path: &Path) -> Result<(StatementDocument, InputKind)> {
    let kind = InputKind::detect(path);
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let doc = match kind {
        InputKind::Fragments => {
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
        }
        InputKind::PlainText => split_text_pages(&s),
    };
    Ok((doc, kind))
}

pub fn split_text_pages(text: &str) -> StatementDocument {
    StatementDocument {
        pages: text
            .split('\u{000C}')
            .filter(|p| !p.trim().is_empty())
            .map(Page::from_plain_text)
            .collect(),
    }
}
