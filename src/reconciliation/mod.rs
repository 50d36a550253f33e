//! Reconciliation logic for the DigiGold Reconciliation Engine.
//!
//! This module contains the four pipeline stages: input normalization,
//! cross-system correlation, decision-table classification and result
//! aggregation, together with the pipeline that runs them in sequence.

mod aggregate;
mod classify;
mod correlate;
mod normalize;
mod pipeline;

pub use aggregate::build_report;
pub use classify::{
    AugmontPattern, DECISION_TABLE, DecisionRule, StatusPattern, classify, combination_string,
};
pub use correlate::{JoinIndex, correlate};
pub use normalize::{canonical, normalize_finfinity, normalize_source};
pub use pipeline::reconcile;
