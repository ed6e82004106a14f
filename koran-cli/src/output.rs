use anyhow::{Context, Result};
use koran_core::{NumericLocale, Record};
use koran_ingest::Extraction;
use serde::Serialize;
use std::io::Write;

/// Flat CSV row. Amount columns are either canonical decimals or the
/// statement's display form.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    account_number: &'a str,
    date: &'a str,
    time: &'a str,
    description: &'a str,
    reference: &'a str,
    debit: String,
    credit: String,
    balance: String,
    currency: &'a str,
    opening_balance: String,
}

impl<'a> CsvRow<'a> {
    fn new(r: &'a Record, display: Option<&NumericLocale>) -> Self {
        let (debit, credit, balance, opening_balance) = match display {
            Some(locale) => {
                let shown = r.display(locale);
                (shown.debit, shown.credit, shown.balance, shown.opening_balance)
            }
            None => {
                let plain = |v: Option<rust_decimal::Decimal>| {
                    v.map(|v| v.to_string()).unwrap_or_default()
                };
                (
                    plain(r.debit),
                    plain(r.credit),
                    plain(r.balance),
                    plain(r.opening_balance),
                )
            }
        };
        Self {
            account_number: &r.account_number,
            date: &r.date,
            time: r.time.as_deref().unwrap_or(""),
            description: &r.description,
            reference: r.reference.as_deref().unwrap_or(""),
            debit,
            credit,
            balance,
            currency: &r.currency,
            opening_balance,
        }
    }
}

pub fn write_csv<W: Write>(
    out: W,
    extractions: &[Extraction],
    display: Option<&NumericLocale>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    let mut wrote_any = false;
    for ex in extractions {
        for r in &ex.records {
            wtr.serialize(CsvRow::new(r, display))
                .context("write csv row")?;
            wrote_any = true;
        }
    }
    if !wrote_any {
        wtr.write_record([
            "account_number",
            "date",
            "time",
            "description",
            "reference",
            "debit",
            "credit",
            "balance",
            "currency",
            "opening_balance",
        ])
        .context("write csv header")?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}

pub fn write_json<W: Write>(mut out: W, extractions: &[Extraction]) -> Result<()> {
    match extractions {
        [single] => serde_json::to_writer_pretty(&mut out, single),
        many => serde_json::to_writer_pretty(&mut out, many),
    }
    .context("write json")?;
    writeln!(out)?;
    out.flush().context("flush json")?;
    Ok(())
}
