//! Core data models for the DigiGold Reconciliation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod classification;
mod correlated;
mod record;
mod report;

pub use classification::{
    ActionRequired, ClassificationResult, ClassifiedRecord, DecisionCategory,
};
pub use correlated::{CorrelatedRecord, MISSING_STATUS, MatchOutcome};
pub use record::{NormalizedRecord, RawRecord, SourceData, SourceSystem};
pub use report::{
    ACTION_SUMMARY, COMPLETE_FINFINITY, MISSING_IN_AUGMONT, MISSING_IN_BOTH, MISSING_IN_CASHFREE,
    RAW_AUGMONT, RAW_CASHFREE, RAW_FINFINITY, ReconciliationReport, Row, STATUS_COMBINATIONS,
    SUMMARY, Table, sanitize_sheet_name,
};
