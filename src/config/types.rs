//! Configuration types for reconciliation runs.
//!
//! This module contains the strongly-typed source-schema structures that
//! describe, per source system, which columns must be present and which
//! carry the join keys and status values. They are deserialized from YAML
//! configuration files, and [`ReconcileSpec::default`] provides the
//! standard DigiGold column mappings.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::SourceSystem;

/// Column designations for the Finfinity dataset.
///
/// Finfinity carries two independent join keys: the Order Id matched
/// against Cashfree and the Merchant Transaction ID matched against
/// Augmont.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinfinitySpec {
    /// Columns that must be present in the dataset.
    pub required_columns: Vec<String>,
    /// The column joined against Cashfree's key column.
    pub order_id_column: String,
    /// The column joined against Augmont's key column.
    pub merchant_txn_column: String,
    /// The column carrying the order status.
    pub status_column: String,
}

impl Default for FinfinitySpec {
    fn default() -> Self {
        Self {
            required_columns: vec![
                "Order Id".to_string(),
                "Merchant Transaction ID".to_string(),
                "Order Status".to_string(),
            ],
            order_id_column: "Order Id".to_string(),
            merchant_txn_column: "Merchant Transaction ID".to_string(),
            status_column: "Order Status".to_string(),
        }
    }
}

/// Column designations for a secondary dataset (Cashfree or Augmont).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Columns that must be present in the dataset.
    pub required_columns: Vec<String>,
    /// The column the dataset is indexed by for lookups.
    pub key_column: String,
    /// The column carrying the transaction status.
    pub status_column: String,
}

/// The complete column-mapping profile for one reconciliation run.
///
/// # Example
///
/// ```
/// use digigold_recon::config::ReconcileSpec;
///
/// let spec = ReconcileSpec::default();
/// assert_eq!(spec.cashfree.key_column, "Order Id");
/// assert_eq!(spec.augmont.key_column, "Merchant Transaction Id");
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileSpec {
    /// Column designations for Finfinity.
    pub finfinity: FinfinitySpec,
    /// Column designations for Cashfree.
    pub cashfree: SourceSpec,
    /// Column designations for Augmont.
    pub augmont: SourceSpec,
}

impl Default for ReconcileSpec {
    fn default() -> Self {
        Self {
            finfinity: FinfinitySpec::default(),
            cashfree: SourceSpec {
                required_columns: vec![
                    "Order Id".to_string(),
                    "Transaction Status".to_string(),
                ],
                key_column: "Order Id".to_string(),
                status_column: "Transaction Status".to_string(),
            },
            augmont: SourceSpec {
                required_columns: vec![
                    "Merchant Transaction Id".to_string(),
                    "Transaction Status".to_string(),
                ],
                key_column: "Merchant Transaction Id".to_string(),
                status_column: "Transaction Status".to_string(),
            },
        }
    }
}

impl ReconcileSpec {
    /// Checks that every designated key and status column is also listed in
    /// its source's required columns, so schema validation catches a broken
    /// upload before a row lookup silently comes up empty.
    pub fn validate(&self) -> EngineResult<()> {
        let fin = &self.finfinity;
        for column in [
            &fin.order_id_column,
            &fin.merchant_txn_column,
            &fin.status_column,
        ] {
            require_listed(SourceSystem::Finfinity, column, &fin.required_columns)?;
        }

        for (system, spec) in [
            (SourceSystem::Cashfree, &self.cashfree),
            (SourceSystem::Augmont, &self.augmont),
        ] {
            require_listed(system, &spec.key_column, &spec.required_columns)?;
            require_listed(system, &spec.status_column, &spec.required_columns)?;
        }

        Ok(())
    }
}

fn require_listed(system: SourceSystem, column: &str, required: &[String]) -> EngineResult<()> {
    let listed = required
        .iter()
        .any(|req| req.trim().eq_ignore_ascii_case(column.trim()));
    if listed {
        Ok(())
    } else {
        Err(EngineError::InvalidSourceSpec {
            system,
            message: format!("column '{}' is not in the required column set", column),
        })
    }
}
