//! Transaction segmentation.
//!
//! Filtered lines are walked top-to-bottom and partitioned into blocks, one
//! per transaction. A block opens on a date line, collects description text,
//! may pick up a standalone time and a reference number, and closes on the
//! first line carrying at least three amount tokens.
//!
//! Classification is a fixed priority table (`RULES`): date, time,
//! reference, amount, description. The first matching rule wins, which makes
//! the tie-breaks explicit: a single unbroken digit run is a reference (it
//! can never hold three tokens), anything with separators and three tokens
//! is an amount line.
//!
//! All carried state lives in [`SegmenterState`]; it survives page breaks so
//! the last date and time can be carried forward.

use std::mem;
use std::sync::LazyLock;

use koran_core::{
    ExtractConfig, NumericLocale, OrphanAmountPolicy, Result, amount_token, parse_amount,
};
use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::diagnostics::Diagnostics;

static DATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<date>\d{2}\s+[A-Za-z]{3}\s+\d{4})\b",
        r"(?:,?\s*(?P<time>\d{2}:\d{2}(?::\d{2})?)\b)?",
        r"(?P<rest>.*)$"
    ))
    .expect("date line regex")
});

static TIME_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}(?::\d{2})?$").expect("time line regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Date,
    Time,
    Reference,
    Amount,
    Description,
}

/// The trailing monetary triplet of an amount line. `None` marks a token
/// that did not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Amounts {
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub balance: Option<Decimal>,
}

impl Amounts {
    pub fn missing(&self) -> usize {
        [self.debit, self.credit, self.balance]
            .iter()
            .filter(|v| v.is_none())
            .count()
    }
}

/// A block still waiting for its amount line.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenBlock {
    pub lines: Vec<String>,
    pub date: String,
    pub time: Option<String>,
    pub reference: Option<String>,
    pub description: Vec<String>,
}

impl OpenBlock {
    fn new(first_line: &str, date: String, time: Option<String>) -> Self {
        Self {
            lines: vec![first_line.to_string()],
            date,
            time,
            reference: None,
            description: Vec::new(),
        }
    }

    fn close(self, amounts: Amounts) -> TransactionBlock {
        TransactionBlock {
            lines: self.lines,
            date: self.date,
            time: self.time,
            reference: self.reference,
            description: self.description,
            amounts,
        }
    }
}

/// One segmented transaction, from its date line to its amount line.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBlock {
    /// Every physical line the block consumed, in order.
    pub lines: Vec<String>,
    pub date: String,
    pub time: Option<String>,
    pub reference: Option<String>,
    pub description: Vec<String>,
    pub amounts: Amounts,
}

impl TransactionBlock {
    /// Description parts joined with single spaces.
    pub fn description_text(&self) -> String {
        self.description
            .iter()
            .flat_map(|part| part.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    AwaitingDate,
    Accumulating(OpenBlock),
    /// Closed block held back so following lines can extend its
    /// description. Only reached with `trailing_description` on.
    Complete(TransactionBlock),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmenterState {
    pub phase: Phase,
    /// Set right after a date line that carried no time.
    expect_time: bool,
    /// Last date and time seen, kept across blocks and pages.
    carried: Option<(String, Option<String>)>,
    /// Description text seen while no block was open.
    loose: Vec<String>,
}

impl SegmenterState {
    pub fn carried_date(&self) -> Option<&str> {
        self.carried.as_ref().map(|(d, _)| d.as_str())
    }

    fn open_block_without_time(&self) -> bool {
        matches!(&self.phase, Phase::Accumulating(b) if b.time.is_none())
    }
}

/// Compiled per-config line patterns.
#[derive(Debug, Clone)]
pub struct LinePatterns {
    reference: Regex,
    locale: NumericLocale,
}

impl LinePatterns {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let reference = Regex::new(&format!(r"^\d{{{},}}$", config.reference_min_digits))?;
        Ok(Self {
            reference,
            locale: config.numeric_locale,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Classified<'l> {
    Date {
        date: String,
        time: Option<&'l str>,
        rest: &'l str,
    },
    Time(&'l str),
    Reference(&'l str),
    Amount {
        amounts: Amounts,
        leading: String,
    },
    Description(&'l str),
}

impl Classified<'_> {
    fn kind(&self) -> LineKind {
        match self {
            Classified::Date { .. } => LineKind::Date,
            Classified::Time(_) => LineKind::Time,
            Classified::Reference(_) => LineKind::Reference,
            Classified::Amount { .. } => LineKind::Amount,
            Classified::Description(_) => LineKind::Description,
        }
    }
}

type Matcher = for<'l> fn(&LinePatterns, &SegmenterState, &'l str) -> Option<Classified<'l>>;

struct Rule {
    kind: LineKind,
    matches: Matcher,
}

const RULES: &[Rule] = &[
    Rule {
        kind: LineKind::Date,
        matches: match_date,
    },
    Rule {
        kind: LineKind::Time,
        matches: match_time,
    },
    Rule {
        kind: LineKind::Reference,
        matches: match_reference,
    },
    Rule {
        kind: LineKind::Amount,
        matches: match_amount,
    },
    Rule {
        kind: LineKind::Description,
        matches: match_description,
    },
];

fn match_date<'l>(_: &LinePatterns, _: &SegmenterState, line: &'l str) -> Option<Classified<'l>> {
    let caps = DATE_LINE.captures(line)?;
    let date = caps["date"].split_whitespace().collect::<Vec<_>>().join(" ");
    let time = caps.name("time").map(|m| m.as_str());
    let rest = caps
        .name("rest")
        .map_or("", |m| m.as_str())
        .trim_start_matches(|c: char| c == ',' || c.is_whitespace())
        .trim_end();
    Some(Classified::Date { date, time, rest })
}

fn match_time<'l>(
    _: &LinePatterns,
    state: &SegmenterState,
    line: &'l str,
) -> Option<Classified<'l>> {
    if !state.expect_time || !state.open_block_without_time() {
        return None;
    }
    TIME_LINE.is_match(line).then_some(Classified::Time(line))
}

fn match_reference<'l>(
    patterns: &LinePatterns,
    _: &SegmenterState,
    line: &'l str,
) -> Option<Classified<'l>> {
    patterns
        .reference
        .is_match(line)
        .then_some(Classified::Reference(line))
}

fn match_amount<'l>(
    patterns: &LinePatterns,
    _: &SegmenterState,
    line: &'l str,
) -> Option<Classified<'l>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    // A bare `-` stands for an empty column, but only among the last three words.
    let positions: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|&(i, w)| amount_token(w).is_some() || (*w == "-" && i + 3 >= words.len()))
        .map(|(i, _)| i)
        .collect();
    if positions.len() < 3 {
        return None;
    }

    let triplet = &positions[positions.len() - 3..];
    let parse = |i: usize| {
        amount_token(words[i]).and_then(|t| parse_amount(t, &patterns.locale))
    };
    let amounts = Amounts {
        debit: parse(triplet[0]),
        credit: parse(triplet[1]),
        balance: parse(triplet[2]),
    };
    // Three unparsable tokens means this was never an amount line.
    if amounts.missing() == 3 {
        return None;
    }

    Some(Classified::Amount {
        amounts,
        leading: words[..triplet[0]].join(" "),
    })
}

fn match_description<'l>(
    _: &LinePatterns,
    _: &SegmenterState,
    line: &'l str,
) -> Option<Classified<'l>> {
    (!line.is_empty()).then_some(Classified::Description(line))
}

/// The segmentation state machine for one document.
pub struct Segmenter<'a> {
    patterns: &'a LinePatterns,
    trailing_description: bool,
    orphan_amounts: OrphanAmountPolicy,
    state: SegmenterState,
    diagnostics: Diagnostics,
}

impl<'a> Segmenter<'a> {
    pub fn new(patterns: &'a LinePatterns, config: &ExtractConfig) -> Self {
        Self {
            patterns,
            trailing_description: config.trailing_description,
            orphan_amounts: config.orphan_amounts,
            state: SegmenterState::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn state(&self) -> &SegmenterState {
        &self.state
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// How the next line would be classified in the current state.
    pub fn classify_line(&self, line: &str) -> Option<LineKind> {
        self.classify(line.trim(), true).map(|c| c.kind())
    }

    /// Feed one filtered line. Completed blocks are appended to `out`.
    pub fn push_line(&mut self, line: &str, out: &mut Vec<TransactionBlock>) {
        let line = line.trim();
        let Some(classified) = self.classify(line, true) else {
            return;
        };
        trace!(kind = ?classified.kind(), line, "classified line");

        self.state.expect_time = false;
        self.apply(line, classified, true, out);
    }

    /// Close out a page: an open block without an amount line is dropped,
    /// a held block is emitted. Carried date and time survive.
    pub fn finish_page(&mut self, out: &mut Vec<TransactionBlock>) {
        match mem::take(&mut self.state.phase) {
            Phase::Accumulating(open) => self.drop_incomplete(open),
            Phase::Complete(done) => out.push(done),
            Phase::AwaitingDate => {}
        }
        self.state.expect_time = false;
        self.discard_loose();
    }

    fn classify<'l>(&self, line: &'l str, allow_date: bool) -> Option<Classified<'l>> {
        RULES
            .iter()
            .filter(|rule| allow_date || rule.kind != LineKind::Date)
            .find_map(|rule| (rule.matches)(self.patterns, &self.state, line))
    }

    /// `record` is false when `line` is the remainder of a date line that
    /// was already recorded.
    fn apply(
        &mut self,
        line: &str,
        classified: Classified<'_>,
        record: bool,
        out: &mut Vec<TransactionBlock>,
    ) {
        match classified {
            Classified::Date { date, time, rest } => {
                self.on_date(line, date, time.map(str::to_string), out);
                if !rest.is_empty() {
                    if let Some(next) = self.classify(rest, false) {
                        self.apply(rest, next, false, out);
                    }
                }
                self.state.expect_time = self.state.open_block_without_time();
            }
            Classified::Time(time) => self.on_time(time),
            Classified::Reference(reference) => self.on_reference(reference, record),
            Classified::Amount { amounts, leading } => {
                self.on_amount(line, amounts, leading, record, out)
            }
            Classified::Description(text) => self.on_description(text, record),
        }
    }

    fn on_date(
        &mut self,
        line: &str,
        date: String,
        time: Option<String>,
        out: &mut Vec<TransactionBlock>,
    ) {
        match mem::take(&mut self.state.phase) {
            Phase::Accumulating(open) => self.drop_incomplete(open),
            Phase::Complete(done) => out.push(done),
            Phase::AwaitingDate => {}
        }
        self.discard_loose();

        self.state.carried = Some((date.clone(), time.clone()));
        self.diagnostics.blocks_started += 1;
        self.state.phase = Phase::Accumulating(OpenBlock::new(line, date, time));
    }

    fn on_time(&mut self, time: &str) {
        if let Phase::Accumulating(open) = &mut self.state.phase {
            open.lines.push(time.to_string());
            open.time = Some(time.to_string());
            if let Some((_, carried_time)) = &mut self.state.carried {
                *carried_time = open.time.clone();
            }
        }
    }

    fn on_reference(&mut self, reference: &str, record: bool) {
        match &mut self.state.phase {
            Phase::Accumulating(open) => {
                if record {
                    open.lines.push(reference.to_string());
                }
                if open.reference.is_none() {
                    open.reference = Some(reference.to_string());
                } else {
                    debug!(reference, "block already has a reference; ignoring");
                }
            }
            Phase::Complete(done) if done.reference.is_none() => {
                done.lines.push(reference.to_string());
                done.reference = Some(reference.to_string());
            }
            _ => debug!(reference, "reference outside any transaction; ignoring"),
        }
    }

    fn on_amount(
        &mut self,
        line: &str,
        amounts: Amounts,
        leading: String,
        record: bool,
        out: &mut Vec<TransactionBlock>,
    ) {
        match mem::take(&mut self.state.phase) {
            Phase::Accumulating(mut open) => {
                if record {
                    open.lines.push(line.to_string());
                }
                if !leading.is_empty() {
                    open.description.push(leading);
                }
                self.complete(open.close(amounts), out);
            }
            previous => {
                if let Phase::Complete(done) = previous {
                    out.push(done);
                }
                self.on_orphan_amount(line, amounts, leading, out);
            }
        }
    }

    fn on_orphan_amount(
        &mut self,
        line: &str,
        amounts: Amounts,
        leading: String,
        out: &mut Vec<TransactionBlock>,
    ) {
        let carried = match self.orphan_amounts {
            OrphanAmountPolicy::AttachToPriorDate => self.state.carried.clone(),
            OrphanAmountPolicy::Discard => None,
        };
        let loose = mem::take(&mut self.state.loose);

        let Some((date, time)) = carried else {
            self.diagnostics.orphan_amount_lines += 1;
            debug!(line, "amount line outside any transaction; discarding");
            return;
        };

        debug!(line, date = %date, "attaching amount line to prior date");
        self.diagnostics.blocks_started += 1;
        let mut lines = loose.clone();
        lines.push(line.to_string());
        let mut description = loose;
        if !leading.is_empty() {
            description.push(leading);
        }
        let open = OpenBlock {
            lines,
            date,
            time,
            reference: None,
            description,
        };
        self.complete(open.close(amounts), out);
    }

    fn on_description(&mut self, text: &str, record: bool) {
        match &mut self.state.phase {
            Phase::Accumulating(open) => {
                if record {
                    open.lines.push(text.to_string());
                }
                open.description.push(text.to_string());
            }
            Phase::Complete(done) => {
                done.lines.push(text.to_string());
                done.description.push(text.to_string());
            }
            Phase::AwaitingDate => self.state.loose.push(text.to_string()),
        }
    }

    fn complete(&mut self, block: TransactionBlock, out: &mut Vec<TransactionBlock>) {
        self.diagnostics.unparsable_amounts += block.amounts.missing();
        if self.trailing_description {
            self.state.phase = Phase::Complete(block);
        } else {
            out.push(block);
        }
    }

    fn drop_incomplete(&mut self, open: OpenBlock) {
        self.diagnostics.incomplete_blocks += 1;
        debug!(
            date = %open.date,
            lines = open.lines.len(),
            "dropping transaction without an amount line"
        );
    }

    fn discard_loose(&mut self) {
        if !self.state.loose.is_empty() {
            debug!(
                lines = self.state.loose.len(),
                "discarding text outside any transaction"
            );
            self.state.loose.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    fn run(config: &ExtractConfig, lines: &[&str]) -> (Vec<TransactionBlock>, Diagnostics) {
        let patterns = LinePatterns::new(config).unwrap();
        let mut seg = Segmenter::new(&patterns, config);
        let mut out = Vec::new();
        for line in lines {
            seg.push_line(line, &mut out);
        }
        seg.finish_page(&mut out);
        (out, seg.into_diagnostics())
    }

    fn run_default(lines: &[&str]) -> (Vec<TransactionBlock>, Diagnostics) {
        run(&ExtractConfig::default(), lines)
    }

    #[test]
    fn test_multi_line_block() {
        let (blocks, diag) = run_default(&[
            "05 Jan 2024, 09:15:00",
            "Transfer to John",
            "1234567890123",
            "100.000,00 0,00 5.000.000,00",
        ]);
        assert_eq!(blocks.len(), 1);
        let b = &blocks[0];
        assert_eq!(b.date, "05 Jan 2024");
        assert_eq!(b.time.as_deref(), Some("09:15:00"));
        assert_eq!(b.reference.as_deref(), Some("1234567890123"));
        assert_eq!(b.description_text(), "Transfer to John");
        assert_eq!(b.amounts.debit, dec("100000.00"));
        assert_eq!(b.amounts.credit, dec("0"));
        assert_eq!(b.amounts.balance, dec("5000000.00"));
        assert_eq!(b.lines.len(), 4);
        assert_eq!(diag.blocks_started, 1);
        assert_eq!(diag.incomplete_blocks, 0);
    }

    #[test]
    fn test_standalone_time_after_date() {
        let (blocks, _) = run_default(&[
            "06 Jan 2024",
            "10:30:00",
            "Payroll",
            "0,00 2.500.000,00 7.500.000,00",
        ]);
        assert_eq!(blocks[0].time.as_deref(), Some("10:30:00"));
        assert_eq!(blocks[0].description_text(), "Payroll");
    }

    #[test]
    fn test_time_only_consumed_immediately_after_date() {
        let (blocks, _) = run_default(&[
            "06 Jan 2024",
            "Payroll",
            "10:30:00",
            "0,00 2.500.000,00 7.500.000,00",
        ]);
        assert_eq!(blocks[0].time, None);
        assert_eq!(blocks[0].description_text(), "Payroll 10:30:00");
    }

    #[test]
    fn test_single_line_row() {
        let (blocks, _) = run_default(&["07 Jan 2024 ATM withdrawal 500.000,00 0,00 7.000.000,00"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].description_text(), "ATM withdrawal");
        assert_eq!(blocks[0].amounts.debit, dec("500000"));
        assert_eq!(blocks[0].lines.len(), 1);
    }

    #[test]
    fn test_reference_never_joins_description() {
        let (blocks, _) = run_default(&[
            "05 Jan 2024",
            "9876543210",
            "Bill payment",
            "1122334455",
            "50.000,00 0,00 950.000,00",
        ]);
        let b = &blocks[0];
        assert_eq!(b.reference.as_deref(), Some("9876543210"));
        assert!(!b.description_text().contains("9876543210"));
        assert!(!b.description_text().contains("1122334455"));
    }

    #[test]
    fn test_short_digit_runs_are_description() {
        let (blocks, _) = run_default(&["05 Jan 2024", "123456", "1,00 0,00 1,00"]);
        assert_eq!(blocks[0].reference, None);
        assert_eq!(blocks[0].description_text(), "123456");
    }

    #[test]
    fn test_reference_min_digits_is_configurable() {
        let config = ExtractConfig {
            reference_min_digits: 6,
            ..ExtractConfig::default()
        };
        let (blocks, _) = run(&config, &["05 Jan 2024", "123456", "1,00 0,00 1,00"]);
        assert_eq!(blocks[0].reference.as_deref(), Some("123456"));
    }

    #[test]
    fn test_block_without_amount_is_dropped() {
        let (blocks, diag) = run_default(&[
            "05 Jan 2024",
            "Lost transaction",
            "06 Jan 2024",
            "Kept",
            "1,00 0,00 1,00",
            "07 Jan 2024",
            "Also lost",
        ]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].date, "06 Jan 2024");
        assert_eq!(diag.blocks_started, 3);
        assert_eq!(diag.incomplete_blocks, 2);
    }

    #[test]
    fn test_all_unparsable_triplet_is_description() {
        let (blocks, diag) = run_default(&["05 Jan 2024", "1,2,3 4,5,6 7,8,9", "1,00 0,00 1,00"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].description_text(), "1,2,3 4,5,6 7,8,9");
        assert_eq!(diag.unparsable_amounts, 0);
    }

    #[test]
    fn test_partially_unparsable_triplet_keeps_record() {
        let (blocks, diag) = run_default(&["05 Jan 2024", "Fee", "1,2,3 0,00 99,00"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].amounts.debit, None);
        assert_eq!(blocks[0].amounts.credit, dec("0"));
        assert_eq!(blocks[0].amounts.balance, dec("99"));
        assert_eq!(diag.unparsable_amounts, 1);
    }

    #[test]
    fn test_last_three_tokens_win() {
        let (blocks, _) = run_default(&["05 Jan 2024", "Invoice 42 paid 7 10,00 0,00 90,00"]);
        let b = &blocks[0];
        assert_eq!(b.amounts.debit, dec("10"));
        assert_eq!(b.amounts.balance, dec("90"));
        assert_eq!(b.description_text(), "Invoice 42 paid 7");
    }

    #[test]
    fn test_orphan_amount_discarded_by_default() {
        let (blocks, diag) = run_default(&[
            "05 Jan 2024",
            "Transfer",
            "1,00 0,00 1,00",
            "2,00 0,00 3,00",
        ]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(diag.orphan_amount_lines, 1);
        assert_eq!(diag.blocks_started, 1);
    }

    #[test]
    fn test_orphan_amount_attached_to_prior_date() {
        let config = ExtractConfig {
            orphan_amounts: OrphanAmountPolicy::AttachToPriorDate,
            ..ExtractConfig::default()
        };
        let (blocks, diag) = run(
            &config,
            &[
                "05 Jan 2024, 08:00:00",
                "Transfer",
                "1,00 0,00 1,00",
                "Admin fee",
                "2,00 0,00 3,00",
            ],
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].date, "05 Jan 2024");
        assert_eq!(blocks[1].time.as_deref(), Some("08:00:00"));
        assert_eq!(blocks[1].description_text(), "Admin fee");
        assert_eq!(diag.blocks_started, 2);
        assert_eq!(diag.orphan_amount_lines, 0);
    }

    #[test]
    fn test_orphan_without_any_date_is_discarded_even_when_attaching() {
        let config = ExtractConfig {
            orphan_amounts: OrphanAmountPolicy::AttachToPriorDate,
            ..ExtractConfig::default()
        };
        let (blocks, diag) = run(&config, &["1,00 0,00 1,00"]);
        assert!(blocks.is_empty());
        assert_eq!(diag.orphan_amount_lines, 1);
    }

    #[test]
    fn test_trailing_description_extends_closed_block() {
        let config = ExtractConfig {
            trailing_description: true,
            ..ExtractConfig::default()
        };
        let lines = [
            "05 Jan 2024",
            "Transfer",
            "1,00 0,00 1,00",
            "to savings",
            "06 Jan 2024",
            "Fee",
            "2,00 0,00 3,00",
        ];
        let (blocks, _) = run(&config, &lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].description_text(), "Transfer to savings");
        assert_eq!(blocks[1].description_text(), "Fee");

        let (blocks, _) = run_default(&lines);
        assert_eq!(blocks[0].description_text(), "Transfer");
    }

    #[test]
    fn test_non_monotonic_dates_keep_document_order() {
        let (blocks, _) = run_default(&[
            "09 Jan 2024",
            "1,00 0,00 1,00",
            "02 Jan 2024",
            "2,00 0,00 3,00",
        ]);
        let dates: Vec<_> = blocks.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["09 Jan 2024", "02 Jan 2024"]);
    }

    #[test]
    fn test_rule_priority() {
        let config = ExtractConfig::default();
        let patterns = LinePatterns::new(&config).unwrap();
        let mut seg = Segmenter::new(&patterns, &config);

        assert_eq!(seg.classify_line("05 Jan 2024, 09:15:00"), Some(LineKind::Date));
        assert_eq!(seg.classify_line("1234567890"), Some(LineKind::Reference));
        assert_eq!(seg.classify_line("1.234.567.890"), Some(LineKind::Description));
        assert_eq!(seg.classify_line("1.234 567 890,00"), Some(LineKind::Amount));
        assert_eq!(seg.classify_line("09:15:00"), Some(LineKind::Description));
        assert_eq!(seg.classify_line("   "), None);

        let mut out = Vec::new();
        seg.push_line("05 Jan 2024", &mut out);
        assert_eq!(seg.classify_line("09:15:00"), Some(LineKind::Time));
        assert_eq!(seg.state().carried_date(), Some("05 Jan 2024"));
    }

    #[test]
    fn test_page_end_keeps_carried_date() {
        let config = ExtractConfig {
            orphan_amounts: OrphanAmountPolicy::AttachToPriorDate,
            ..ExtractConfig::default()
        };
        let patterns = LinePatterns::new(&config).unwrap();
        let mut seg = Segmenter::new(&patterns, &config);
        let mut out = Vec::new();

        seg.push_line("05 Jan 2024", &mut out);
        seg.push_line("Continued on next page", &mut out);
        seg.finish_page(&mut out);
        assert!(out.is_empty());
        assert_eq!(seg.diagnostics().incomplete_blocks, 1);

        seg.push_line("5,00 0,00 10,00", &mut out);
        seg.finish_page(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, "05 Jan 2024");
    }

    #[test]
    fn test_dash_marks_empty_amount_column() {
        let (blocks, diag) =
            run_default(&["05 Jan 2024", "Transfer", "- 100.000,00 5.000.000,00"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].amounts.debit, None);
        assert_eq!(blocks[0].amounts.credit, dec("100000"));
        assert_eq!(blocks[0].amounts.balance, dec("5000000"));
        assert_eq!(diag.incomplete_blocks, 0);
        assert_eq!(diag.unparsable_amounts, 1);
    }

    #[test]
    fn test_dash_inside_description_is_not_an_amount() {
        let (blocks, _) = run_default(&["05 Jan 2024", "Transfer - Coffee", "1,00 - 9,00"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].description_text(), "Transfer - Coffee");
        assert_eq!(blocks[0].amounts.credit, None);
    }
}
