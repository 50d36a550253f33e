//! Source record models and tabular input types.
//!
//! This module defines the raw and normalized record types that flow through
//! the reconciliation pipeline, together with the [`SourceData`] container
//! that the embedding application fills from its parsed uploads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single raw row from a source system: column name mapped to the cell
/// text exactly as received. Rows are consumed transiently by normalization
/// and carried through unchanged for raw pass-through reporting.
pub type RawRecord = BTreeMap<String, String>;

/// Identifies which system of record a dataset or record came from.
///
/// # Example
///
/// ```
/// use digigold_recon::models::SourceSystem;
///
/// assert_eq!(SourceSystem::Finfinity.to_string(), "Finfinity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    /// The internal system of record for gold-purchase orders.
    Finfinity,
    /// The external payment gateway providing transaction status.
    Cashfree,
    /// The external gold-order provider providing order/cancellation status.
    Augmont,
}

impl std::fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceSystem::Finfinity => write!(f, "Finfinity"),
            SourceSystem::Cashfree => write!(f, "Cashfree"),
            SourceSystem::Augmont => write!(f, "Augmont"),
        }
    }
}

/// One source system's tabular input: a header plus data rows.
///
/// The embedding application builds one `SourceData` per uploaded file after
/// parsing it; the engine itself never touches a file or socket. Column
/// names keep their original order so raw pass-through tables render the
/// dataset exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceData {
    /// Column names in their original order.
    pub columns: Vec<String>,
    /// Data rows, each mapping column name to raw cell text.
    pub rows: Vec<RawRecord>,
}

impl SourceData {
    /// Creates a new dataset from a header and rows.
    pub fn new(columns: Vec<String>, rows: Vec<RawRecord>) -> Self {
        Self { columns, rows }
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves a column name against the header, ignoring case and
    /// surrounding whitespace.
    ///
    /// Returns the actual header spelling so cell lookups hit the row keys
    /// as they were received.
    ///
    /// # Example
    ///
    /// ```
    /// use digigold_recon::models::SourceData;
    ///
    /// let data = SourceData::new(vec![" order id ".to_string()], vec![]);
    /// assert_eq!(data.resolve_column("Order Id"), Some(" order id "));
    /// assert_eq!(data.resolve_column("Amount"), None);
    /// ```
    pub fn resolve_column(&self, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.columns
            .iter()
            .find(|col| col.trim().eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }
}

/// A record whose join key and status have been canonicalized.
///
/// Produced by the normalization stage; immutable afterwards. The key and
/// status are trimmed and uppercased, and may legitimately be empty when
/// the underlying cell was blank - an empty key never joins, an empty
/// status classifies as unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// The system this record came from.
    pub system: SourceSystem,
    /// Canonical join key (trimmed, uppercased). For Finfinity this is the
    /// Order Id used for the Cashfree join; for the secondary systems it is
    /// the column the system is indexed by.
    pub key: String,
    /// Canonical Merchant Transaction ID, set only on Finfinity records,
    /// used for the independent Augmont join.
    pub merchant_key: Option<String>,
    /// Canonical status value.
    pub status: String,
    /// The full original row, untouched, for pass-through reporting.
    pub raw: RawRecord,
}
