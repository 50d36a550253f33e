//! Report models for the reconciliation output.
//!
//! This module contains the [`ReconciliationReport`] type and its
//! [`Table`] building block. A report is an ordered collection of named
//! tables; the embedding application renders each table as one workbook
//! sheet, so table names obey workbook sheet-name restrictions.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single report row: column name mapped to rendered cell text.
pub type Row = BTreeMap<String, String>;

/// Name of the per-system totals and match-statistics table.
pub const SUMMARY: &str = "SUMMARY";
/// Name of the per-action counts table.
pub const ACTION_SUMMARY: &str = "ACTION_SUMMARY";
/// Name of the per-combination counts table.
pub const STATUS_COMBINATIONS: &str = "STATUS_COMBINATIONS";
/// Name of the fully enriched Finfinity dataset table.
pub const COMPLETE_FINFINITY: &str = "COMPLETE_FINFINITY";
/// Name of the table of records absent from Cashfree.
pub const MISSING_IN_CASHFREE: &str = "MISSING_IN_CASHFREE";
/// Name of the table of records absent from Augmont.
pub const MISSING_IN_AUGMONT: &str = "MISSING_IN_AUGMONT";
/// Name of the table of records absent from both secondary systems.
pub const MISSING_IN_BOTH: &str = "MISSING_IN_BOTH";
/// Name of the Finfinity raw pass-through table.
pub const RAW_FINFINITY: &str = "RAW_FINFINITY";
/// Name of the Cashfree raw pass-through table.
pub const RAW_CASHFREE: &str = "RAW_CASHFREE";
/// Name of the Augmont raw pass-through table.
pub const RAW_AUGMONT: &str = "RAW_AUGMONT";

/// One named result table: a header plus rendered rows.
///
/// Rows are maps, so the `columns` vector is the authority on column
/// order when the table is rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// The table's name (workbook sheet name).
    pub name: String,
    /// Column names in render order.
    pub columns: Vec<String>,
    /// The table's rows.
    pub rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given name and columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as a JSON value with cells in declared column
    /// order.
    ///
    /// The layout is `{"name": ..., "columns": [...], "rows": [[...], ...]}`
    /// with each row an array aligned to `columns`; cells for columns a row
    /// does not carry render as empty strings. The output is fully
    /// deterministic for a given table.
    ///
    /// # Example
    ///
    /// ```
    /// use digigold_recon::models::{Row, Table};
    ///
    /// let mut table = Table::new("SUMMARY", vec!["Metric".to_string(), "Count".to_string()]);
    /// let mut row = Row::new();
    /// row.insert("Metric".to_string(), "Total Finfinity Records".to_string());
    /// row.insert("Count".to_string(), "3".to_string());
    /// table.rows.push(row);
    ///
    /// let json = table.to_json();
    /// assert_eq!(json["rows"][0][0], "Total Finfinity Records");
    /// assert_eq!(json["rows"][0][1], "3");
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| row.get(col).cloned().unwrap_or_default())
                    .collect::<Vec<String>>()
                    .into()
            })
            .collect();

        serde_json::json!({
            "name": self.name,
            "columns": self.columns,
            "rows": rows,
        })
    }
}

/// The terminal aggregate of one reconciliation run: an ordered collection
/// of named tables.
///
/// Built once per run and read-only thereafter; it has no identity beyond
/// that run. Table order is the order sheets should appear in the rendered
/// workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationReport {
    /// The report's tables, in render order.
    pub tables: Vec<Table>,
}

impl ReconciliationReport {
    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns the table names in render order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Renders the whole report as a JSON array of tables, in order.
    pub fn to_json(&self) -> serde_json::Value {
        self.tables
            .iter()
            .map(Table::to_json)
            .collect::<Vec<_>>()
            .into()
    }
}

/// Makes a table name safe for use as a workbook sheet name.
///
/// Replaces the characters `[ ] : * ? / \` with underscores and truncates
/// to 31 characters.
///
/// # Example
///
/// ```
/// use digigold_recon::models::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("A/B:C"), "A_B_C");
/// assert_eq!(
///     sanitize_sheet_name("FIN_PAID_CF_SUCCESS_AUG_NOT_CANCEL"),
///     "FIN_PAID_CF_SUCCESS_AUG_NOT_CAN"
/// );
/// ```
pub fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(31)
        .collect()
}
