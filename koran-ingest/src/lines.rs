//! Reading-order reconstruction: positioned fragments → ordered lines.
//!
//! Fragments are clustered by `round(y / tolerance)`. The same bucket key
//! drives both grouping and the top-to-bottom sort, so two fragments share
//! a line exactly when they share a key. Visually adjacent rows that land in
//! one bucket merge; that is the accepted cost of a fixed tolerance.

use std::collections::BTreeMap;

use koran_core::{Line, TextFragment};

/// Group fragments into lines ordered top-to-bottom, each joined
/// left-to-right with single spaces.
pub fn reconstruct_lines(fragments: &[TextFragment], tolerance: f64) -> Vec<Line> {
    let mut buckets: BTreeMap<i64, Vec<&TextFragment>> = BTreeMap::new();

    for frag in fragments {
        if frag.text.trim().is_empty() || !frag.x.is_finite() || !frag.y.is_finite() {
            continue;
        }
        buckets.entry(bucket_key(frag.y, tolerance)).or_default().push(frag);
    }

    buckets
        .into_iter()
        .map(|(key, mut row)| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            let text = row
                .iter()
                .map(|f| f.text.trim())
                .collect::<Vec<_>>()
                .join(" ");
            Line {
                y: key as f64 * tolerance,
                text,
            }
        })
        .collect()
}

/// Lines of a plain-text page rendering, blank lines skipped. `y` is the
/// line index.
pub fn plain_text_lines(text: &str) -> Vec<Line> {
    text.lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, l)| !l.is_empty())
        .map(|(i, l)| Line {
            y: i as f64,
            text: l.to_string(),
        })
        .collect()
}

fn bucket_key(y: f64, tolerance: f64) -> i64 {
    (y / tolerance).round() as i64
}
