use serde::Serialize;

/// Counters describing what an extraction kept and what it dropped.
///
/// `blocks_started - records == incomplete_blocks` holds for every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub pages: usize,
    /// Reconstructed lines before noise filtering.
    pub lines: usize,
    pub noise_lines: usize,
    pub blocks_started: usize,
    pub records: usize,
    /// Blocks that saw a date but never an amount line.
    pub incomplete_blocks: usize,
    /// Amount lines that arrived with no open block and were discarded.
    pub orphan_amount_lines: usize,
    /// Amount fields left empty because their token did not parse.
    pub unparsable_amounts: usize,
    pub metadata_found: bool,
}

impl Diagnostics {
    /// Anything dropped or left empty along the way.
    pub fn has_losses(&self) -> bool {
        self.incomplete_blocks > 0 || self.orphan_amount_lines > 0 || self.unparsable_amounts > 0
    }
}
