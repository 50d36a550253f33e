//! Decision-table classification logic.
//!
//! This module holds the master decision table and the classifier that
//! evaluates it against each correlated record. Evaluation is strictly
//! first-match-wins over [`DECISION_TABLE`]: rules that require a specific
//! Finfinity status sit above the broader rules matching the same Cashfree
//! status for any Finfinity value, and the final catch-all makes the table
//! total. The numeric priority on each rule is reporting metadata only.
//!
//! Re-ordering the table changes classification outcomes. In particular,
//! never sort it by priority.

use crate::models::{
    ActionRequired, ClassificationResult, CorrelatedRecord, DecisionCategory, MatchOutcome,
};

/// A pattern over one system's canonical status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPattern {
    /// Matches every status, including empty and the `MISSING` sentinel.
    Any,
    /// Matches any of the listed canonical statuses exactly.
    OneOf(&'static [&'static str]),
}

impl StatusPattern {
    fn matches(self, status: &str) -> bool {
        match self {
            StatusPattern::Any => true,
            StatusPattern::OneOf(candidates) => candidates.contains(&status),
        }
    }
}

/// A pattern over the Augmont presence-and-cancellation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmontPattern {
    /// Matches whether or not an Augmont record exists.
    Any,
    /// Matches a present record whose status is not a cancellation.
    PresentNotCancelled,
    /// Matches a present record whose status is a cancellation.
    PresentCancelled,
    /// Matches only when no Augmont record was found.
    Missing,
}

impl AugmontPattern {
    fn matches(self, outcome: &MatchOutcome) -> bool {
        match self {
            AugmontPattern::Any => true,
            AugmontPattern::PresentNotCancelled => {
                outcome.present && !is_cancelled(&outcome.status)
            }
            AugmontPattern::PresentCancelled => outcome.present && is_cancelled(&outcome.status),
            AugmontPattern::Missing => !outcome.present,
        }
    }
}

/// Both spellings occur in Augmont exports. Exact equality on purpose:
/// a substring test would swallow "NOT CANCELLED".
fn is_cancelled(status: &str) -> bool {
    status == "CANCELLED" || status == "CANCELED"
}

/// One row of the master decision table.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRule {
    /// Stable identifier recorded on every classification this rule fires
    /// for.
    pub id: &'static str,
    finfinity: StatusPattern,
    cashfree: StatusPattern,
    augmont: AugmontPattern,
    /// The category this rule assigns.
    pub category: DecisionCategory,
    /// The action this rule assigns.
    pub action: ActionRequired,
    /// Reporting priority, 1 (routine) to 4 (urgent).
    pub priority: u8,
}

impl DecisionRule {
    fn matches(&self, record: &CorrelatedRecord) -> bool {
        self.finfinity.matches(&record.record.status)
            && self.cashfree.matches(&record.cashfree.status)
            && self.augmont.matches(&record.augmont)
    }
}

/// The master decision table, evaluated top to bottom, first match wins.
pub const DECISION_TABLE: &[DecisionRule] = &[
    DecisionRule {
        id: "fully_reconciled",
        finfinity: StatusPattern::OneOf(&["PAID", "ACTIVE"]),
        cashfree: StatusPattern::OneOf(&["SUCCESS"]),
        augmont: AugmontPattern::PresentNotCancelled,
        category: DecisionCategory::FullyReconciled,
        action: ActionRequired::NoAction,
        priority: 1,
    },
    DecisionRule {
        id: "refund_required",
        finfinity: StatusPattern::OneOf(&["PAID", "ACTIVE"]),
        cashfree: StatusPattern::OneOf(&["SUCCESS"]),
        augmont: AugmontPattern::PresentCancelled,
        category: DecisionCategory::RefundRequired,
        action: ActionRequired::RefundRequired,
        priority: 4,
    },
    DecisionRule {
        id: "sync_pending",
        finfinity: StatusPattern::OneOf(&["PENDING"]),
        cashfree: StatusPattern::OneOf(&["SUCCESS"]),
        augmont: AugmontPattern::PresentNotCancelled,
        category: DecisionCategory::SyncPending,
        action: ActionRequired::SyncMonitor,
        priority: 2,
    },
    DecisionRule {
        id: "gateway_success_internal_fail",
        finfinity: StatusPattern::OneOf(&["FAILED"]),
        cashfree: StatusPattern::OneOf(&["SUCCESS"]),
        augmont: AugmontPattern::PresentNotCancelled,
        category: DecisionCategory::GatewaySuccessInternalFail,
        action: ActionRequired::Investigate,
        priority: 3,
    },
    // The two specific gateway-failure rules must stay above the broad one.
    DecisionRule {
        id: "order_active_payment_failed",
        finfinity: StatusPattern::OneOf(&["ACTIVE"]),
        cashfree: StatusPattern::OneOf(&["FAILED"]),
        augmont: AugmontPattern::Any,
        category: DecisionCategory::OrderActivePaymentFailed,
        action: ActionRequired::CancelOrder,
        priority: 3,
    },
    DecisionRule {
        id: "inconsistent_state",
        finfinity: StatusPattern::OneOf(&["PAID"]),
        cashfree: StatusPattern::OneOf(&["FAILED"]),
        augmont: AugmontPattern::Any,
        category: DecisionCategory::InconsistentState,
        action: ActionRequired::Investigate,
        priority: 4,
    },
    DecisionRule {
        id: "payment_failed",
        finfinity: StatusPattern::Any,
        cashfree: StatusPattern::OneOf(&["FAILED"]),
        augmont: AugmontPattern::Any,
        category: DecisionCategory::PaymentFailed,
        action: ActionRequired::Ignore,
        priority: 1,
    },
    DecisionRule {
        id: "user_dropped",
        finfinity: StatusPattern::Any,
        cashfree: StatusPattern::OneOf(&["USER_DROPPED"]),
        augmont: AugmontPattern::Any,
        category: DecisionCategory::UserDropped,
        action: ActionRequired::Ignore,
        priority: 1,
    },
    DecisionRule {
        id: "payment_in_progress",
        finfinity: StatusPattern::OneOf(&["PENDING"]),
        cashfree: StatusPattern::OneOf(&["PENDING"]),
        augmont: AugmontPattern::Any,
        category: DecisionCategory::PaymentInProgress,
        action: ActionRequired::WaitRetry,
        priority: 2,
    },
    DecisionRule {
        id: "payment_not_confirmed",
        finfinity: StatusPattern::Any,
        cashfree: StatusPattern::OneOf(&["PENDING"]),
        augmont: AugmontPattern::Any,
        category: DecisionCategory::PaymentNotConfirmed,
        action: ActionRequired::WaitRetry,
        priority: 2,
    },
    // Internal failure outranks the missing-order rule: a FAILED order with
    // a collected payment and no Augmont record is an internal problem
    // first.
    DecisionRule {
        id: "internal_failure",
        finfinity: StatusPattern::OneOf(&["FAILED"]),
        cashfree: StatusPattern::Any,
        augmont: AugmontPattern::Any,
        category: DecisionCategory::InternalFailure,
        action: ActionRequired::Investigate,
        priority: 3,
    },
    DecisionRule {
        id: "payment_success_order_missing",
        finfinity: StatusPattern::Any,
        cashfree: StatusPattern::OneOf(&["SUCCESS"]),
        augmont: AugmontPattern::Missing,
        category: DecisionCategory::PaymentSuccessOrderMissing,
        action: ActionRequired::InvestigateCreateOrder,
        priority: 4,
    },
    DecisionRule {
        id: "uncategorized",
        finfinity: StatusPattern::Any,
        cashfree: StatusPattern::Any,
        augmont: AugmontPattern::Any,
        category: DecisionCategory::Uncategorized,
        action: ActionRequired::Investigate,
        priority: 3,
    },
];

/// Classifies one correlated record.
///
/// Returns exactly one [`ClassificationResult`] for any input; the
/// catch-all rule guarantees totality, so classification cannot fail.
/// Records with identical statuses and presence flags always classify
/// identically.
///
/// # Example
///
/// ```
/// use digigold_recon::models::{
///     CorrelatedRecord, DecisionCategory, MatchOutcome, NormalizedRecord, RawRecord,
///     SourceSystem,
/// };
/// use digigold_recon::reconciliation::classify;
///
/// let record = CorrelatedRecord {
///     record: NormalizedRecord {
///         system: SourceSystem::Finfinity,
///         key: "O1".to_string(),
///         merchant_key: Some("M1".to_string()),
///         status: "PAID".to_string(),
///         raw: RawRecord::new(),
///     },
///     cashfree: MatchOutcome::matched("SUCCESS"),
///     augmont: MatchOutcome::matched("NOT CANCELLED"),
/// };
///
/// let result = classify(&record);
/// assert_eq!(result.category, DecisionCategory::FullyReconciled);
/// assert_eq!(result.priority, 1);
/// assert_eq!(result.combination, "FIN_PAID_CF_SUCCESS_AUG_NOT_CANCEL");
/// ```
pub fn classify(record: &CorrelatedRecord) -> ClassificationResult {
    let rule = DECISION_TABLE
        .iter()
        .find(|rule| rule.matches(record))
        .expect("decision table ends in a catch-all rule");

    ClassificationResult {
        category: rule.category,
        action: rule.action,
        priority: rule.priority,
        rule_id: rule.id,
        combination: combination_string(record),
    }
}

/// Derives the status-combination string used for grouping.
///
/// The format is `FIN_{f}_CF_{c}_AUG_{a}`: each segment is the canonical
/// status with spaces replaced by underscores and truncated to 10
/// characters; a missing secondary contributes `MISSING`. Two records with
/// identical statuses and presence flags always produce the identical
/// string.
pub fn combination_string(record: &CorrelatedRecord) -> String {
    format!(
        "FIN_{}_CF_{}_AUG_{}",
        status_segment(&record.record.status),
        outcome_segment(&record.cashfree),
        outcome_segment(&record.augmont),
    )
}

fn status_segment(status: &str) -> String {
    status.replace(' ', "_").chars().take(10).collect()
}

fn outcome_segment(outcome: &MatchOutcome) -> String {
    if outcome.present {
        status_segment(&outcome.status)
    } else {
        outcome.status.clone()
    }
}
