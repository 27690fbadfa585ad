//! Record normalizer: extractor replies + receipt times -> transactions.
//!
//! Every record is handled on its own. A record that fails to parse is
//! skipped and counted; it never aborts the batch.

use anyhow::Result;
use cashcast_core::{categorize, millis_to_local_date, to_iso_date, Transaction, TxnKind};
use chrono_tz::Tz;
use log::debug;
use std::collections::HashMap;

use crate::parsers::{parse_extracted, DateResolver};
use crate::types::{into_maps, RawMessage};

/// Output of one normalization pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub transactions: Vec<Transaction>,
    /// Balance carried by the most recent record that reported one
    pub latest_known_balance: Option<f64>,
    /// Records dropped as non-transactions
    pub skipped: usize,
}

/// Keeps the balance observation with the greatest timestamp.
/// Equal timestamps: the later observation wins.
#[derive(Debug, Clone, Copy, Default)]
struct BalanceTracker {
    latest: Option<(i64, f64)>,
}

impl BalanceTracker {
    fn observe(&mut self, timestamp: i64, balance: f64) {
        if self.latest.is_none_or(|(ts, _)| timestamp >= ts) {
            self.latest = Some((timestamp, balance));
        }
    }

    fn balance(&self) -> Option<f64> {
        self.latest.map(|(_, b)| b)
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    dates: DateResolver,
    timezone: Tz,
}

impl Normalizer {
    /// `timezone` decides which calendar day a receipt timestamp falls on.
    pub fn new(timezone: Tz) -> Result<Self> {
        Ok(Self {
            dates: DateResolver::new()?,
            timezone,
        })
    }

    pub fn normalize(
        &self,
        records: &HashMap<String, String>,
        timestamps: &HashMap<String, i64>,
    ) -> Normalized {
        self.normalize_with_progress(records, timestamps, |_, _| {})
    }

    pub fn normalize_messages(&self, messages: &[RawMessage]) -> Normalized {
        let (records, timestamps) = into_maps(messages);
        self.normalize(&records, &timestamps)
    }

    /// Normalize all records, calling `on_record(processed, total)` after each.
    ///
    /// Records are visited in ascending id order so repeated runs over the
    /// same maps produce the same transaction order.
    pub fn normalize_with_progress<F>(
        &self,
        records: &HashMap<String, String>,
        timestamps: &HashMap<String, i64>,
        mut on_record: F,
    ) -> Normalized
    where
        F: FnMut(usize, usize),
    {
        let mut ids: Vec<&String> = records.keys().collect();
        ids.sort();

        let total = ids.len();
        let mut out = Normalized::default();
        let mut balances = BalanceTracker::default();

        for (i, id) in ids.into_iter().enumerate() {
            let timestamp = timestamps.get(id).copied();

            match self.normalize_record(id, &records[id], timestamp) {
                Ok((txn, balance)) => {
                    if let Some(b) = balance {
                        balances.observe(timestamp.unwrap_or(0), b);
                    }
                    out.transactions.push(txn);
                }
                Err(e) => {
                    debug!("skipping record {id}: {e:#}");
                    out.skipped += 1;
                }
            }

            on_record(i + 1, total);
        }

        out.latest_known_balance = balances.balance();
        out
    }

    fn normalize_record(
        &self,
        id: &str,
        raw: &str,
        timestamp: Option<i64>,
    ) -> Result<(Transaction, Option<f64>)> {
        let rec = parse_extracted(raw)?;
        let kind = TxnKind::parse(rec.kind.as_deref());

        let date_iso = match rec.date.as_deref() {
            Some(text) => self.dates.resolve(text),
            None => timestamp
                .and_then(|ts| millis_to_local_date(ts, self.timezone))
                .map(to_iso_date),
        };

        let category = categorize(rec.merchant.as_deref(), &kind);

        let txn = Transaction {
            id: id.to_string(),
            amount: rec.amount,
            kind,
            date_iso,
            merchant: rec.merchant,
            category,
        };
        Ok((txn, rec.balance))
    }
}
