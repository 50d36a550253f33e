//! Input normalization logic.
//!
//! This module validates each source dataset against its required columns
//! and canonicalizes the designated key and status fields. Validation runs
//! once against the column set, before any row is touched, so a broken
//! upload fails fast without partial work.

use tracing::{debug, warn};

use crate::config::{FinfinitySpec, SourceSpec};
use crate::error::{EngineError, EngineResult};
use crate::models::{NormalizedRecord, RawRecord, SourceData, SourceSystem};

/// Canonicalizes a join key or status value: strips surrounding whitespace
/// and uppercases.
///
/// # Example
///
/// ```
/// use digigold_recon::reconciliation::canonical;
///
/// assert_eq!(canonical(" abc123 "), "ABC123");
/// assert_eq!(canonical("Not Cancelled"), "NOT CANCELLED");
/// assert_eq!(canonical("   "), "");
/// ```
pub fn canonical(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalizes the Finfinity dataset.
///
/// Each row yields one [`NormalizedRecord`] carrying both canonical join
/// keys (Order Id for the Cashfree join, Merchant Transaction ID for the
/// Augmont join) and the canonical order status. All other fields pass
/// through untouched in the record's raw row. Output order matches input
/// order.
///
/// # Errors
///
/// Returns [`EngineError::MissingColumn`] if any required column is absent
/// from the dataset's header; no row is processed in that case.
pub fn normalize_finfinity(
    data: &SourceData,
    spec: &FinfinitySpec,
) -> EngineResult<Vec<NormalizedRecord>> {
    let system = SourceSystem::Finfinity;
    require_columns(data, system, &spec.required_columns)?;

    let order_col = resolve(data, system, &spec.order_id_column)?;
    let merchant_col = resolve(data, system, &spec.merchant_txn_column)?;
    let status_col = resolve(data, system, &spec.status_column)?;

    check_row_count(data, system);

    let records = data
        .rows
        .iter()
        .map(|row| NormalizedRecord {
            system,
            key: canonical(cell(row, order_col)),
            merchant_key: Some(canonical(cell(row, merchant_col))),
            status: canonical(cell(row, status_col)),
            raw: row.clone(),
        })
        .collect();

    Ok(records)
}

/// Normalizes a secondary dataset (Cashfree or Augmont).
///
/// Each row yields one [`NormalizedRecord`] with the canonical lookup key
/// and transaction status; output order matches input order.
///
/// # Errors
///
/// Returns [`EngineError::MissingColumn`] if any required column is absent
/// from the dataset's header; no row is processed in that case.
pub fn normalize_source(
    data: &SourceData,
    system: SourceSystem,
    spec: &SourceSpec,
) -> EngineResult<Vec<NormalizedRecord>> {
    require_columns(data, system, &spec.required_columns)?;

    let key_col = resolve(data, system, &spec.key_column)?;
    let status_col = resolve(data, system, &spec.status_column)?;

    check_row_count(data, system);

    let records = data
        .rows
        .iter()
        .map(|row| NormalizedRecord {
            system,
            key: canonical(cell(row, key_col)),
            merchant_key: None,
            status: canonical(cell(row, status_col)),
            raw: row.clone(),
        })
        .collect();

    Ok(records)
}

/// Validates the dataset's header against the required column set.
fn require_columns(
    data: &SourceData,
    system: SourceSystem,
    required: &[String],
) -> EngineResult<()> {
    for column in required {
        if data.resolve_column(column).is_none() {
            return Err(EngineError::MissingColumn {
                system,
                column: column.clone(),
            });
        }
    }
    Ok(())
}

fn resolve<'a>(data: &'a SourceData, system: SourceSystem, column: &str) -> EngineResult<&'a str> {
    data.resolve_column(column)
        .ok_or_else(|| EngineError::MissingColumn {
            system,
            column: column.to_string(),
        })
}

/// A blank cell and an absent cell normalize identically.
fn cell<'a>(row: &'a RawRecord, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

fn check_row_count(data: &SourceData, system: SourceSystem) {
    if data.is_empty() {
        warn!(%system, "dataset has no rows; run will report zero matches");
    } else {
        debug!(%system, rows = data.len(), "normalizing dataset");
    }
}
