//! Result aggregation logic.
//!
//! This module folds the classified record sequence into the named report
//! tables: per-system totals and match statistics, per-action counts,
//! status-combination groups, missing-record sets, the enriched complete
//! dataset and the raw pass-throughs. Every table is a pure function of
//! its inputs, so re-running aggregation on the same records reproduces
//! the report byte for byte.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    ACTION_SUMMARY, COMPLETE_FINFINITY, ClassifiedRecord, MISSING_IN_AUGMONT, MISSING_IN_BOTH,
    MISSING_IN_CASHFREE, RAW_AUGMONT, RAW_CASHFREE, RAW_FINFINITY, ReconciliationReport, Row,
    STATUS_COMBINATIONS, SUMMARY, SourceData, Table, sanitize_sheet_name,
};

const IN_CASHFREE: &str = "In Cashfree?";
const IN_AUGMONT: &str = "In Augmont?";
const CASHFREE_STATUS: &str = "Cashfree_Status";
const AUGMONT_STATUS: &str = "Augmont_Status";
const DECISION_CATEGORY: &str = "Decision_Category";
const ACTION_REQUIRED: &str = "Action_Required";
const PRIORITY: &str = "Priority";
const STATUS_COMBINATION: &str = "Status_Combination";

/// Builds the full reconciliation report from the classified records and
/// the three original datasets.
///
/// Table order matches the order sheets should appear in the rendered
/// workbook: summaries first, then the complete dataset, the missing-record
/// sets, one table per distinct status combination in first-seen order, and
/// the raw pass-throughs last.
pub fn build_report(
    classified: &[ClassifiedRecord],
    finfinity: &SourceData,
    cashfree: &SourceData,
    augmont: &SourceData,
) -> ReconciliationReport {
    let columns = enriched_columns(&finfinity.columns);
    let enriched: Vec<Row> = classified.iter().map(enriched_row).collect();

    let mut tables = vec![
        summary_table(classified, finfinity.len(), cashfree.len(), augmont.len()),
        action_summary_table(classified),
        status_combinations_table(classified),
        complete_table(&columns, &enriched),
        missing_table(
            MISSING_IN_CASHFREE,
            "No records missing in Cashfree",
            &columns,
            classified,
            &enriched,
            |record| !record.correlated.cashfree.present,
        ),
        missing_table(
            MISSING_IN_AUGMONT,
            "No records missing in Augmont",
            &columns,
            classified,
            &enriched,
            |record| !record.correlated.augmont.present,
        ),
        missing_table(
            MISSING_IN_BOTH,
            "No records missing in both systems",
            &columns,
            classified,
            &enriched,
            |record| !record.correlated.cashfree.present && !record.correlated.augmont.present,
        ),
    ];

    tables.extend(combination_tables(&columns, classified, &enriched));

    tables.push(raw_table(RAW_FINFINITY, finfinity));
    tables.push(raw_table(RAW_CASHFREE, cashfree));
    tables.push(raw_table(RAW_AUGMONT, augmont));

    debug!(tables = tables.len(), "assembled report");
    ReconciliationReport { tables }
}

/// The complete-dataset header: original Finfinity columns followed by the
/// appended reconciliation columns.
fn enriched_columns(finfinity_columns: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = finfinity_columns.to_vec();
    columns.extend(
        [
            IN_CASHFREE,
            IN_AUGMONT,
            CASHFREE_STATUS,
            AUGMONT_STATUS,
            DECISION_CATEGORY,
            ACTION_REQUIRED,
            PRIORITY,
            STATUS_COMBINATION,
        ]
        .map(String::from),
    );
    columns
}

fn enriched_row(record: &ClassifiedRecord) -> Row {
    let correlated = &record.correlated;
    let classification = &record.classification;

    let mut row = correlated.record.raw.clone();
    row.insert(IN_CASHFREE.to_string(), yes_no(correlated.cashfree.present));
    row.insert(IN_AUGMONT.to_string(), yes_no(correlated.augmont.present));
    row.insert(
        CASHFREE_STATUS.to_string(),
        correlated.cashfree.status.clone(),
    );
    row.insert(
        AUGMONT_STATUS.to_string(),
        correlated.augmont.status.clone(),
    );
    row.insert(
        DECISION_CATEGORY.to_string(),
        classification.category.to_string(),
    );
    row.insert(
        ACTION_REQUIRED.to_string(),
        classification.action.to_string(),
    );
    row.insert(PRIORITY.to_string(), classification.priority.to_string());
    row.insert(
        STATUS_COMBINATION.to_string(),
        classification.combination.clone(),
    );
    row
}

fn yes_no(value: bool) -> String {
    if value { "YES" } else { "NO" }.to_string()
}

/// Per-system totals plus the matched/not-matched statistics of the
/// Finfinity dataset against each secondary system.
fn summary_table(
    classified: &[ClassifiedRecord],
    finfinity_total: usize,
    cashfree_total: usize,
    augmont_total: usize,
) -> Table {
    let matched_cashfree = classified
        .iter()
        .filter(|r| r.correlated.cashfree.present)
        .count();
    let matched_augmont = classified
        .iter()
        .filter(|r| r.correlated.augmont.present)
        .count();
    let matched_both = classified
        .iter()
        .filter(|r| r.correlated.cashfree.present && r.correlated.augmont.present)
        .count();
    let total = classified.len();

    let mut table = Table::new(
        SUMMARY,
        vec![
            "Metric".to_string(),
            "Count".to_string(),
            "Matched".to_string(),
        ],
    );

    let mut push = |metric: &str, count: String, matched: Option<String>| {
        let mut row = Row::new();
        row.insert("Metric".to_string(), metric.to_string());
        row.insert("Count".to_string(), count);
        if let Some(matched) = matched {
            row.insert("Matched".to_string(), matched);
        }
        table.rows.push(row);
    };

    push("Total Finfinity Records", finfinity_total.to_string(), None);
    push("Total Cashfree Records", cashfree_total.to_string(), None);
    push("Total Augmont Records", augmont_total.to_string(), None);
    push("", String::new(), None);
    push("", "Not Matched".to_string(), Some("Matched".to_string()));
    push(
        "Finfinity Records in Cashfree",
        (total - matched_cashfree).to_string(),
        Some(matched_cashfree.to_string()),
    );
    push(
        "Finfinity Records in Augmont",
        (total - matched_augmont).to_string(),
        Some(matched_augmont.to_string()),
    );
    push(
        "Finfinity Records in Cashfree & Augmont",
        (total - matched_both).to_string(),
        Some(matched_both.to_string()),
    );

    table
}

/// Record counts per action label, sorted by descending count and then by
/// label so ties render deterministically.
fn action_summary_table(classified: &[ClassifiedRecord]) -> Table {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in classified {
        *counts
            .entry(record.classification.action.to_string())
            .or_default() += 1;
    }

    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut table = Table::new(
        ACTION_SUMMARY,
        vec!["Count".to_string(), ACTION_REQUIRED.to_string()],
    );
    for (action, count) in entries {
        let mut row = Row::new();
        row.insert("Count".to_string(), count.to_string());
        row.insert(ACTION_REQUIRED.to_string(), action);
        table.rows.push(row);
    }
    table
}

/// Record counts per status combination, sorted by descending count and
/// then by combination string.
fn status_combinations_table(classified: &[ClassifiedRecord]) -> Table {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in classified {
        *counts
            .entry(record.classification.combination.clone())
            .or_default() += 1;
    }

    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut table = Table::new(
        STATUS_COMBINATIONS,
        vec![STATUS_COMBINATION.to_string(), "Count".to_string()],
    );
    for (combination, count) in entries {
        let mut row = Row::new();
        row.insert(STATUS_COMBINATION.to_string(), combination);
        row.insert("Count".to_string(), count.to_string());
        table.rows.push(row);
    }
    table
}

/// Every Finfinity record with its appended reconciliation columns, in
/// original input order.
fn complete_table(columns: &[String], enriched: &[Row]) -> Table {
    let mut table = Table::new(COMPLETE_FINFINITY, columns.to_vec());
    table.rows = enriched.to_vec();
    table
}

/// Filters the enriched rows by a presence predicate. An empty result
/// renders as a single note row so the sheet is never blank.
fn missing_table(
    name: &str,
    empty_note: &str,
    columns: &[String],
    classified: &[ClassifiedRecord],
    enriched: &[Row],
    is_missing: impl Fn(&ClassifiedRecord) -> bool,
) -> Table {
    let rows: Vec<Row> = classified
        .iter()
        .zip(enriched)
        .filter(|(record, _)| is_missing(record))
        .map(|(_, row)| row.clone())
        .collect();

    if rows.is_empty() {
        let mut table = Table::new(name, vec!["Note".to_string()]);
        let mut row = Row::new();
        row.insert("Note".to_string(), empty_note.to_string());
        table.rows.push(row);
        return table;
    }

    let mut table = Table::new(name, columns.to_vec());
    table.rows = rows;
    table
}

/// One table per distinct status combination, in first-seen order, named
/// after the combination (sanitized for workbook sheet naming).
fn combination_tables(
    columns: &[String],
    classified: &[ClassifiedRecord],
    enriched: &[Row],
) -> Vec<Table> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Row>> = HashMap::new();

    for (record, row) in classified.iter().zip(enriched) {
        let combination = &record.classification.combination;
        if !groups.contains_key(combination) {
            order.push(combination.clone());
        }
        groups
            .entry(combination.clone())
            .or_default()
            .push(row.clone());
    }

    order
        .into_iter()
        .map(|combination| {
            let mut table = Table::new(sanitize_sheet_name(&combination), columns.to_vec());
            table.rows = groups.remove(&combination).unwrap_or_default();
            table
        })
        .collect()
}

/// A raw pass-through of one input dataset, untouched, for audit.
fn raw_table(name: &str, data: &SourceData) -> Table {
    let mut table = Table::new(name, data.columns.clone());
    table.rows = data.rows.clone();
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassificationResult, CorrelatedRecord, MatchOutcome, NormalizedRecord, RawRecord,
        SourceSystem,
    };
    use crate::reconciliation::classify;

    fn source_data(columns: &[&str], rows: Vec<RawRecord>) -> SourceData {
        SourceData::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    fn raw(fields: &[(&str, &str)]) -> RawRecord {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn classified(
        order_id: &str,
        fin: &str,
        cashfree: Option<&str>,
        augmont: Option<&str>,
    ) -> ClassifiedRecord {
        let correlated = CorrelatedRecord {
            record: NormalizedRecord {
                system: SourceSystem::Finfinity,
                key: order_id.to_string(),
                merchant_key: Some(format!("M-{order_id}")),
                status: fin.to_string(),
                raw: raw(&[("Order Id", order_id), ("Order Status", fin)]),
            },
            cashfree: match cashfree {
                Some(status) => MatchOutcome::matched(status),
                None => MatchOutcome::missing(),
            },
            augmont: match augmont {
                Some(status) => MatchOutcome::matched(status),
                None => MatchOutcome::missing(),
            },
        };
        let classification: ClassificationResult = classify(&correlated);
        ClassifiedRecord {
            correlated,
            classification,
        }
    }

    fn fixture() -> (Vec<ClassifiedRecord>, SourceData, SourceData, SourceData) {
        let records = vec![
            classified("O1", "PAID", Some("SUCCESS"), Some("NOT CANCELLED")),
            classified("O2", "PAID", Some("SUCCESS"), Some("NOT CANCELLED")),
            classified("O3", "PAID", Some("SUCCESS"), None),
            classified("O4", "PENDING", None, None),
        ];
        let finfinity = source_data(
            &["Order Id", "Order Status"],
            records.iter().map(|r| r.correlated.record.raw.clone()).collect(),
        );
        let cashfree = source_data(
            &["Order Id", "Transaction Status"],
            vec![
                raw(&[("Order Id", "O1"), ("Transaction Status", "SUCCESS")]),
                raw(&[("Order Id", "O2"), ("Transaction Status", "SUCCESS")]),
                raw(&[("Order Id", "O3"), ("Transaction Status", "SUCCESS")]),
            ],
        );
        let augmont = source_data(
            &["Merchant Transaction Id", "Transaction Status"],
            vec![
                raw(&[("Merchant Transaction Id", "M-O1")]),
                raw(&[("Merchant Transaction Id", "M-O2")]),
            ],
        );
        (records, finfinity, cashfree, augmont)
    }

    /// AG-001: summary carries totals and match statistics
    #[test]
    fn test_summary_counts() {
        let (records, finfinity, cashfree, augmont) = fixture();
        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let summary = report.table(SUMMARY).unwrap();
        assert_eq!(summary.rows[0]["Metric"], "Total Finfinity Records");
        assert_eq!(summary.rows[0]["Count"], "4");
        assert_eq!(summary.rows[1]["Count"], "3");
        assert_eq!(summary.rows[2]["Count"], "2");

        // Matched 3 in Cashfree, 2 in Augmont, 2 in both
        assert_eq!(summary.rows[5]["Metric"], "Finfinity Records in Cashfree");
        assert_eq!(summary.rows[5]["Count"], "1");
        assert_eq!(summary.rows[5]["Matched"], "3");
        assert_eq!(summary.rows[6]["Count"], "2");
        assert_eq!(summary.rows[6]["Matched"], "2");
        assert_eq!(summary.rows[7]["Count"], "2");
        assert_eq!(summary.rows[7]["Matched"], "2");
    }

    /// AG-002: action summary sorts by descending count, then label
    #[test]
    fn test_action_summary_ordering() {
        let (records, finfinity, cashfree, augmont) = fixture();
        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let actions = report.table(ACTION_SUMMARY).unwrap();
        assert_eq!(actions.rows[0]["Action_Required"], "NO ACTION");
        assert_eq!(actions.rows[0]["Count"], "2");
        // The two singleton actions tie on count and order alphabetically
        assert_eq!(actions.rows[1]["Action_Required"], "INVESTIGATE");
        assert_eq!(
            actions.rows[2]["Action_Required"],
            "INVESTIGATE / CREATE ORDER"
        );
    }

    /// AG-003: one group table per combination, first-seen order, all rows
    /// accounted for exactly once
    #[test]
    fn test_combination_groups_partition_the_dataset() {
        let (records, finfinity, cashfree, augmont) = fixture();
        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let combos: Vec<&str> = records
            .iter()
            .map(|r| r.classification.combination.as_str())
            .collect();
        let distinct: Vec<&str> = {
            let mut seen = Vec::new();
            for combo in combos {
                if !seen.contains(&combo) {
                    seen.push(combo);
                }
            }
            seen
        };

        let group_sizes: usize = distinct
            .iter()
            .map(|combo| report.table(&sanitize_sheet_name(combo)).unwrap().len())
            .sum();
        assert_eq!(group_sizes, records.len());

        // First-seen order is preserved among the group tables
        let names = report.table_names();
        let first = names
            .iter()
            .position(|n| *n == sanitize_sheet_name(distinct[0]))
            .unwrap();
        let second = names
            .iter()
            .position(|n| *n == sanitize_sheet_name(distinct[1]))
            .unwrap();
        assert!(first < second);
    }

    /// AG-004: missing tables filter on the presence flags
    #[test]
    fn test_missing_tables() {
        let (records, finfinity, cashfree, augmont) = fixture();
        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let missing_cashfree = report.table(MISSING_IN_CASHFREE).unwrap();
        assert_eq!(missing_cashfree.len(), 1);
        assert_eq!(missing_cashfree.rows[0]["Order Id"], "O4");

        let missing_augmont = report.table(MISSING_IN_AUGMONT).unwrap();
        assert_eq!(missing_augmont.len(), 2);

        let missing_both = report.table(MISSING_IN_BOTH).unwrap();
        assert_eq!(missing_both.len(), 1);
        assert_eq!(missing_both.rows[0]["Order Id"], "O4");
    }

    /// AG-005: an empty missing table renders a note row instead
    #[test]
    fn test_empty_missing_table_has_note_row() {
        let records = vec![classified("O1", "PAID", Some("SUCCESS"), Some("NOT CANCELLED"))];
        let finfinity = source_data(&["Order Id", "Order Status"], vec![]);
        let cashfree = source_data(&["Order Id"], vec![]);
        let augmont = source_data(&["Merchant Transaction Id"], vec![]);

        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let missing = report.table(MISSING_IN_CASHFREE).unwrap();
        assert_eq!(missing.columns, vec!["Note".to_string()]);
        assert_eq!(missing.rows[0]["Note"], "No records missing in Cashfree");
    }

    /// AG-006: the complete table preserves input order and appends the
    /// reconciliation columns
    #[test]
    fn test_complete_table_layout() {
        let (records, finfinity, cashfree, augmont) = fixture();
        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let complete = report.table(COMPLETE_FINFINITY).unwrap();
        assert_eq!(complete.len(), 4);
        assert_eq!(complete.columns[0], "Order Id");
        assert_eq!(
            complete.columns.last().map(String::as_str),
            Some("Status_Combination")
        );

        let ids: Vec<&str> = complete
            .rows
            .iter()
            .map(|r| r["Order Id"].as_str())
            .collect();
        assert_eq!(ids, vec!["O1", "O2", "O3", "O4"]);

        assert_eq!(complete.rows[0]["In Cashfree?"], "YES");
        assert_eq!(complete.rows[3]["In Cashfree?"], "NO");
        assert_eq!(complete.rows[2]["Augmont_Status"], "MISSING");
        assert_eq!(complete.rows[0]["Decision_Category"], "FULLY_RECONCILED");
        assert_eq!(complete.rows[0]["Priority"], "1");
    }

    /// AG-007: raw tables pass the inputs through untouched
    #[test]
    fn test_raw_passthrough() {
        let (records, finfinity, cashfree, augmont) = fixture();
        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let raw_cashfree = report.table(RAW_CASHFREE).unwrap();
        assert_eq!(raw_cashfree.columns, cashfree.columns);
        assert_eq!(raw_cashfree.rows, cashfree.rows);

        let raw_augmont = report.table(RAW_AUGMONT).unwrap();
        assert_eq!(raw_augmont.rows, augmont.rows);
    }

    /// AG-008: fixed tables appear in workbook order
    #[test]
    fn test_table_order() {
        let (records, finfinity, cashfree, augmont) = fixture();
        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let names = report.table_names();
        assert_eq!(
            &names[..7],
            &[
                SUMMARY,
                ACTION_SUMMARY,
                STATUS_COMBINATIONS,
                COMPLETE_FINFINITY,
                MISSING_IN_CASHFREE,
                MISSING_IN_AUGMONT,
                MISSING_IN_BOTH,
            ]
        );
        assert_eq!(names.last(), Some(&RAW_AUGMONT));
    }

    /// AG-009: status-combination counts sort deterministically
    #[test]
    fn test_status_combinations_counts() {
        let (records, finfinity, cashfree, augmont) = fixture();
        let report = build_report(&records, &finfinity, &cashfree, &augmont);

        let combos = report.table(STATUS_COMBINATIONS).unwrap();
        assert_eq!(combos.rows[0]["Count"], "2");
        assert_eq!(
            combos.rows[0]["Status_Combination"],
            "FIN_PAID_CF_SUCCESS_AUG_NOT_CANCEL"
        );
        assert_eq!(combos.len(), 3);
    }
}
