//! Classification outcome models.
//!
//! This module defines the decision categories, required actions and the
//! [`ClassificationResult`] attached to every correlated record by the
//! decision-table classifier.

use serde::{Deserialize, Serialize};

use super::CorrelatedRecord;

/// The operational category assigned to a reconciled record.
///
/// Exactly one category is assigned per record; the catch-all
/// [`DecisionCategory::Uncategorized`] guarantees totality.
///
/// # Example
///
/// ```
/// use digigold_recon::models::DecisionCategory;
///
/// assert_eq!(DecisionCategory::FullyReconciled.to_string(), "FULLY_RECONCILED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionCategory {
    /// All three systems agree: payment collected, order live.
    FullyReconciled,
    /// Payment collected but the Augmont order was cancelled.
    RefundRequired,
    /// Payment collected, order live, internal status lagging behind.
    SyncPending,
    /// Gateway collected the payment but the internal order failed.
    GatewaySuccessInternalFail,
    /// Payment failed at the gateway; no money moved.
    PaymentFailed,
    /// Customer abandoned the payment flow.
    UserDropped,
    /// Both internal order and payment still pending.
    PaymentInProgress,
    /// Internal order live although the payment failed.
    OrderActivePaymentFailed,
    /// Internal order marked paid although the payment failed.
    InconsistentState,
    /// Payment collected but no Augmont order exists.
    PaymentSuccessOrderMissing,
    /// Gateway has not confirmed the payment yet.
    PaymentNotConfirmed,
    /// The internal order failed.
    InternalFailure,
    /// No other rule matched; needs manual review.
    Uncategorized,
}

impl DecisionCategory {
    /// An operator-facing description of what the category means and why.
    pub fn description(self) -> &'static str {
        match self {
            DecisionCategory::FullyReconciled => {
                "All systems aligned - payment successful, order completed, no action needed"
            }
            DecisionCategory::RefundRequired => {
                "Payment SUCCESS but Augmont order CANCELLED - customer paid but order failed, refund needed"
            }
            DecisionCategory::SyncPending => {
                "Finfinity PENDING but Cashfree SUCCESS - internal sync delay, monitor for auto-resolution"
            }
            DecisionCategory::GatewaySuccessInternalFail => {
                "Cashfree SUCCESS but Finfinity FAILED - payment received but internal error, investigate"
            }
            DecisionCategory::PaymentFailed => {
                "Payment failed in Cashfree - no money collected, safe to ignore"
            }
            DecisionCategory::UserDropped => {
                "User abandoned payment flow before completing - normal customer behaviour, no action needed"
            }
            DecisionCategory::PaymentInProgress => {
                "Both Finfinity and Cashfree show PENDING - payment still processing, wait and retry"
            }
            DecisionCategory::OrderActivePaymentFailed => {
                "Order is ACTIVE but payment FAILED - order should be cancelled immediately"
            }
            DecisionCategory::InconsistentState => {
                "Finfinity shows PAID but Cashfree shows FAILED - critical data mismatch, urgent investigation"
            }
            DecisionCategory::PaymentSuccessOrderMissing => {
                "Cashfree SUCCESS but no Augmont order - payment collected but order not created, create order or refund"
            }
            DecisionCategory::PaymentNotConfirmed => {
                "Cashfree shows PENDING - payment not yet confirmed, monitor and retry"
            }
            DecisionCategory::InternalFailure => {
                "Finfinity shows FAILED status - internal system error occurred, check logs"
            }
            DecisionCategory::Uncategorized => {
                "Records missing in Cashfree or Augmont - needs manual review to identify root cause"
            }
        }
    }
}

impl std::fmt::Display for DecisionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DecisionCategory::FullyReconciled => "FULLY_RECONCILED",
            DecisionCategory::RefundRequired => "REFUND_REQUIRED",
            DecisionCategory::SyncPending => "SYNC_PENDING",
            DecisionCategory::GatewaySuccessInternalFail => "GATEWAY_SUCCESS_INTERNAL_FAIL",
            DecisionCategory::PaymentFailed => "PAYMENT_FAILED",
            DecisionCategory::UserDropped => "USER_DROPPED",
            DecisionCategory::PaymentInProgress => "PAYMENT_IN_PROGRESS",
            DecisionCategory::OrderActivePaymentFailed => "ORDER_ACTIVE_PAYMENT_FAILED",
            DecisionCategory::InconsistentState => "INCONSISTENT_STATE",
            DecisionCategory::PaymentSuccessOrderMissing => "PAYMENT_SUCCESS_ORDER_MISSING",
            DecisionCategory::PaymentNotConfirmed => "PAYMENT_NOT_CONFIRMED",
            DecisionCategory::InternalFailure => "INTERNAL_FAILURE",
            DecisionCategory::Uncategorized => "UNCATEGORIZED",
        };
        write!(f, "{}", name)
    }
}

/// The action an operator should take for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionRequired {
    /// Nothing to do.
    #[serde(rename = "NO ACTION")]
    NoAction,
    /// The customer must be refunded.
    #[serde(rename = "REFUND REQUIRED")]
    RefundRequired,
    /// Trigger or monitor an internal sync.
    #[serde(rename = "SYNC / MONITOR")]
    SyncMonitor,
    /// Needs manual investigation.
    #[serde(rename = "INVESTIGATE")]
    Investigate,
    /// Safe to ignore.
    #[serde(rename = "IGNORE")]
    Ignore,
    /// Wait for the payment to settle, then re-check.
    #[serde(rename = "WAIT / RETRY")]
    WaitRetry,
    /// The internal order should be cancelled.
    #[serde(rename = "CANCEL ORDER")]
    CancelOrder,
    /// Investigate, and create the missing order if the payment is genuine.
    #[serde(rename = "INVESTIGATE / CREATE ORDER")]
    InvestigateCreateOrder,
}

impl std::fmt::Display for ActionRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActionRequired::NoAction => "NO ACTION",
            ActionRequired::RefundRequired => "REFUND REQUIRED",
            ActionRequired::SyncMonitor => "SYNC / MONITOR",
            ActionRequired::Investigate => "INVESTIGATE",
            ActionRequired::Ignore => "IGNORE",
            ActionRequired::WaitRetry => "WAIT / RETRY",
            ActionRequired::CancelOrder => "CANCEL ORDER",
            ActionRequired::InvestigateCreateOrder => "INVESTIGATE / CREATE ORDER",
        };
        write!(f, "{}", label)
    }
}

/// The classification attached to one correlated record.
///
/// Exactly one `ClassificationResult` exists per record, never partial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// The assigned decision category.
    pub category: DecisionCategory,
    /// The action an operator should take.
    pub action: ActionRequired,
    /// Reporting priority, 1 (routine) to 4 (urgent). Metadata only; it
    /// never influences which rule matches.
    pub priority: u8,
    /// Identifier of the decision rule that fired.
    pub rule_id: &'static str,
    /// Status-combination string used for grouping, derived from the three
    /// canonical statuses.
    pub combination: String,
}

/// A correlated record paired with its classification - the unit the
/// aggregation stage consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    /// The correlated record.
    pub correlated: CorrelatedRecord,
    /// Its classification.
    pub classification: ClassificationResult,
}
