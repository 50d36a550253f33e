//! Cross-system correlation logic.
//!
//! This module builds the per-secondary-system lookup indexes and joins
//! every Finfinity record against them. The two joins are independent:
//! Cashfree is matched by Order Id and Augmont by Merchant Transaction ID.
//! Correlation never rejects a record - a miss is an outcome, not an
//! error.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{CorrelatedRecord, MatchOutcome, NormalizedRecord};

/// A read-only lookup index over one secondary system's normalized records.
///
/// Built once per reconciliation run, before any lookup happens, and never
/// mutated afterwards. When two rows share a key, the later row wins
/// (last-write-wins in source row order); duplicate keys are tolerated but
/// lossy, so each overwrite is logged.
#[derive(Debug)]
pub struct JoinIndex<'a> {
    by_key: HashMap<&'a str, &'a NormalizedRecord>,
}

impl<'a> JoinIndex<'a> {
    /// Builds the index from a normalized record sequence.
    pub fn build(records: &'a [NormalizedRecord]) -> Self {
        let mut by_key: HashMap<&'a str, &'a NormalizedRecord> =
            HashMap::with_capacity(records.len());

        for record in records {
            if let Some(previous) = by_key.insert(record.key.as_str(), record) {
                warn!(
                    system = %record.system,
                    key = %record.key,
                    previous_status = %previous.status,
                    "duplicate join key; keeping the later row"
                );
            }
        }

        debug!(keys = by_key.len(), rows = records.len(), "built join index");
        Self { by_key }
    }

    /// Looks up a canonical key. An empty key never matches.
    pub fn lookup(&self, key: &str) -> Option<&'a NormalizedRecord> {
        if key.is_empty() {
            return None;
        }
        self.by_key.get(key).copied()
    }

    /// Returns the number of distinct keys in the index.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns true if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Correlates every Finfinity record against both secondary indexes.
///
/// Produces exactly one [`CorrelatedRecord`] per Finfinity record, in input
/// order. A hit records the matched row's canonical status; a miss records
/// the `MISSING` sentinel.
pub fn correlate(
    finfinity: &[NormalizedRecord],
    cashfree: &JoinIndex<'_>,
    augmont: &JoinIndex<'_>,
) -> Vec<CorrelatedRecord> {
    finfinity
        .iter()
        .map(|fin| {
            let cashfree_outcome = match cashfree.lookup(&fin.key) {
                Some(hit) => MatchOutcome::matched(hit.status.clone()),
                None => MatchOutcome::missing(),
            };

            let merchant = fin.merchant_key.as_deref().unwrap_or("");
            let augmont_outcome = match augmont.lookup(merchant) {
                Some(hit) => MatchOutcome::matched(hit.status.clone()),
                None => MatchOutcome::missing(),
            };

            CorrelatedRecord {
                record: fin.clone(),
                cashfree: cashfree_outcome,
                augmont: augmont_outcome,
            }
        })
        .collect()
}
