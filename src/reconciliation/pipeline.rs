//! The reconciliation pipeline.
//!
//! This module wires the four stages together: normalize each dataset,
//! build the secondary lookup indexes, correlate every Finfinity record,
//! classify it against the decision table and aggregate the results into
//! the report. One call is one run; the engine keeps no state between
//! runs.

use tracing::info;

use crate::config::ReconcileSpec;
use crate::error::EngineResult;
use crate::models::{ClassifiedRecord, ReconciliationReport, SourceData, SourceSystem};

use super::aggregate::build_report;
use super::classify::classify;
use super::correlate::{JoinIndex, correlate};
use super::normalize::{normalize_finfinity, normalize_source};

/// Runs a full reconciliation over the three datasets.
///
/// The stages run strictly in sequence; both join indexes are fully built
/// before the first lookup. The returned report is a pure function of the
/// inputs: running the pipeline twice on identical data yields identical
/// tables.
///
/// # Errors
///
/// Returns [`EngineError::MissingColumn`](crate::error::EngineError) if any
/// dataset lacks a required column, and
/// [`EngineError::InvalidSourceSpec`](crate::error::EngineError) if the
/// profile designates a column outside its required set. No partial report
/// is ever produced.
///
/// # Example
///
/// ```
/// use digigold_recon::config::ReconcileSpec;
/// use digigold_recon::models::{COMPLETE_FINFINITY, RawRecord, SourceData};
/// use digigold_recon::reconciliation::reconcile;
///
/// fn row(fields: &[(&str, &str)]) -> RawRecord {
///     fields.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
/// }
///
/// let finfinity = SourceData::new(
///     vec!["Order Id".into(), "Merchant Transaction ID".into(), "Order Status".into()],
///     vec![row(&[("Order Id", "O1"), ("Merchant Transaction ID", "M1"), ("Order Status", "PAID")])],
/// );
/// let cashfree = SourceData::new(
///     vec!["Order Id".into(), "Transaction Status".into()],
///     vec![row(&[("Order Id", "o1"), ("Transaction Status", "SUCCESS")])],
/// );
/// let augmont = SourceData::new(
///     vec!["Merchant Transaction Id".into(), "Transaction Status".into()],
///     vec![row(&[("Merchant Transaction Id", "m1"), ("Transaction Status", "Not Cancelled")])],
/// );
///
/// let report = reconcile(&finfinity, &cashfree, &augmont, &ReconcileSpec::default()).unwrap();
/// let complete = report.table(COMPLETE_FINFINITY).unwrap();
/// assert_eq!(complete.rows[0]["Decision_Category"], "FULLY_RECONCILED");
/// ```
pub fn reconcile(
    finfinity: &SourceData,
    cashfree: &SourceData,
    augmont: &SourceData,
    spec: &ReconcileSpec,
) -> EngineResult<ReconciliationReport> {
    spec.validate()?;

    let fin_records = normalize_finfinity(finfinity, &spec.finfinity)?;
    let cashfree_records = normalize_source(cashfree, SourceSystem::Cashfree, &spec.cashfree)?;
    let augmont_records = normalize_source(augmont, SourceSystem::Augmont, &spec.augmont)?;

    info!(
        finfinity = fin_records.len(),
        cashfree = cashfree_records.len(),
        augmont = augmont_records.len(),
        "datasets normalized"
    );

    // Indexes are complete before the first lookup and read-only after.
    let cashfree_index = JoinIndex::build(&cashfree_records);
    let augmont_index = JoinIndex::build(&augmont_records);

    let classified: Vec<ClassifiedRecord> = correlate(&fin_records, &cashfree_index, &augmont_index)
        .into_iter()
        .map(|correlated| {
            let classification = classify(&correlated);
            ClassifiedRecord {
                correlated,
                classification,
            }
        })
        .collect();

    let report = build_report(&classified, finfinity, cashfree, augmont);

    info!(
        records = classified.len(),
        tables = report.tables.len(),
        "reconciliation completed"
    );

    Ok(report)
}
