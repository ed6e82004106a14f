//! Blocks → records, with the opening balance fixed on the first block.
//!
//! Account metadata is last-match-wins across pages, so records are only
//! materialized once the whole document has been scanned.

use koran_core::{AccountMetadata, Record};
use rust_decimal::Decimal;

use crate::segmenter::TransactionBlock;

#[derive(Debug, Clone, PartialEq)]
struct Draft {
    date: String,
    time: Option<String>,
    description: String,
    reference: Option<String>,
    debit: Option<Decimal>,
    credit: Option<Decimal>,
    balance: Option<Decimal>,
}

#[derive(Debug, Default)]
pub struct RecordBuilder {
    /// Outer `None` until the first block; then the first block's balance,
    /// which may itself be absent.
    opening_balance: Option<Option<Decimal>>,
    drafts: Vec<Draft>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: TransactionBlock) {
        let description = block.description_text();
        let amounts = block.amounts;
        self.opening_balance.get_or_insert(amounts.balance);
        self.drafts.push(Draft {
            date: block.date,
            time: block.time,
            description,
            reference: block.reference,
            debit: amounts.debit,
            credit: amounts.credit,
            balance: amounts.balance,
        });
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn opening_balance(&self) -> Option<Decimal> {
        self.opening_balance.flatten()
    }

    /// Stamp account metadata and the opening balance onto every record.
    pub fn finish(self, metadata: &AccountMetadata) -> Vec<Record> {
        let opening_balance = self.opening_balance.flatten();
        self.drafts
            .into_iter()
            .map(|d| Record {
                account_number: metadata.account_number.clone(),
                date: d.date,
                time: d.time,
                description: d.description,
                reference: d.reference,
                debit: d.debit,
                credit: d.credit,
                balance: d.balance,
                currency: metadata.currency.clone(),
                opening_balance,
            })
            .collect()
    }
}
