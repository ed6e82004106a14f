//! koran-core: statement types, amount normalization, and extraction config

pub mod amount;
pub mod config;
pub mod error;
pub mod types;

pub use amount::{NumericLocale, amount_token, format_amount, parse_amount};
pub use config::{ExtractConfig, OrphanAmountPolicy};
pub use error::{KoranError, Result};
pub use types::{
    AccountMetadata, Line, Page, Record, RecordDisplay, StatementDocument, TextFragment,
    parse_statement_date,
};
