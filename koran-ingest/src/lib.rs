//! koran-ingest: turns positioned statement text into transaction records.

pub mod builder;
pub mod diagnostics;
pub mod lines;
pub mod metadata;
pub mod noise;
pub mod pipeline;
pub mod segmenter;

pub use builder::RecordBuilder;
pub use diagnostics::Diagnostics;
pub use lines::{plain_text_lines, reconstruct_lines};
pub use metadata::MetadataExtractor;
pub use noise::NoiseFilter;
pub use pipeline::{Extraction, StatementExtractor, extract_pages};
pub use segmenter::{Amounts, LineKind, LinePatterns, Segmenter, SegmenterState, TransactionBlock};
