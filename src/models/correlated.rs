//! Correlation outcome models.
//!
//! This module defines the types produced by the correlation stage: the
//! per-secondary-system [`MatchOutcome`] and the [`CorrelatedRecord`] that
//! pairs a Finfinity record with its outcomes in Cashfree and Augmont.

use serde::Serialize;

use super::NormalizedRecord;

/// The sentinel status recorded when a Finfinity record has no counterpart
/// in a secondary system.
pub const MISSING_STATUS: &str = "MISSING";

/// The outcome of looking up one Finfinity record in one secondary system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    /// Whether a counterpart record was found.
    pub present: bool,
    /// The counterpart's canonical status, or [`MISSING_STATUS`] on a miss.
    pub status: String,
}

impl MatchOutcome {
    /// An outcome for a successful lookup carrying the matched record's
    /// canonical status.
    pub fn matched(status: impl Into<String>) -> Self {
        Self {
            present: true,
            status: status.into(),
        }
    }

    /// An outcome for a failed lookup.
    ///
    /// # Example
    ///
    /// ```
    /// use digigold_recon::models::MatchOutcome;
    ///
    /// let outcome = MatchOutcome::missing();
    /// assert!(!outcome.present);
    /// assert_eq!(outcome.status, "MISSING");
    /// ```
    pub fn missing() -> Self {
        Self {
            present: false,
            status: MISSING_STATUS.to_string(),
        }
    }
}

/// One Finfinity record enriched with its lookup outcomes in both secondary
/// systems.
///
/// The two joins are independent: Cashfree is matched by Order Id, Augmont
/// by Merchant Transaction ID. Built once by the correlation stage and
/// immutable thereafter; every Finfinity record yields exactly one
/// `CorrelatedRecord`, matched or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedRecord {
    /// The originating Finfinity record.
    pub record: NormalizedRecord,
    /// Lookup outcome in Cashfree (joined by Order Id).
    pub cashfree: MatchOutcome,
    /// Lookup outcome in Augmont (joined by Merchant Transaction ID).
    pub augmont: MatchOutcome,
}
