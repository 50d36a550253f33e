//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a
//! reconciliation column-mapping profile from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::ReconcileSpec;

/// Loads and provides access to a reconciliation column-mapping profile.
///
/// The `ConfigLoader` reads a YAML profile describing, per source system,
/// the required columns and the key/status column designations. Most
/// deployments use the profile shipped at `config/sources.yaml`; custom
/// profiles let an operator reconcile exports whose headers deviate from
/// the standard DigiGold schema.
///
/// # File Structure
///
/// ```text
/// finfinity:
///   required_columns: ["Order Id", "Merchant Transaction ID", "Order Status"]
///   order_id_column: "Order Id"
///   merchant_txn_column: "Merchant Transaction ID"
///   status_column: "Order Status"
/// cashfree:
///   required_columns: ["Order Id", "Transaction Status"]
///   key_column: "Order Id"
///   status_column: "Transaction Status"
/// augmont:
///   required_columns: ["Merchant Transaction Id", "Transaction Status"]
///   key_column: "Merchant Transaction Id"
///   status_column: "Transaction Status"
/// ```
///
/// # Example
///
/// ```no_run
/// use digigold_recon::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sources.yaml").unwrap();
/// assert_eq!(loader.spec().cashfree.key_column, "Order Id");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    spec: ReconcileSpec,
}

impl ConfigLoader {
    /// Loads a profile from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the profile file (e.g., "./config/sources.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A key or status column is not listed among its source's required
    ///   columns (`InvalidSourceSpec`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let spec: ReconcileSpec =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        spec.validate()?;

        Ok(Self { spec })
    }

    /// Returns the loaded column-mapping profile.
    pub fn spec(&self) -> &ReconcileSpec {
        &self.spec
    }
}

impl Default for ConfigLoader {
    /// A loader carrying the standard DigiGold profile, no file required.
    fn default() -> Self {
        Self {
            spec: ReconcileSpec::default(),
        }
    }
}
