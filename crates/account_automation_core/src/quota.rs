//! Idempotent quota reconciliation.
//!
//! A reconciliation reads the current quota and requests an increase only when
//! the current value is below the target. Repeating it after the increase has
//! landed is a no-op, so the handler can safely be re-driven by duplicate
//! account-created events.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::collaborators::{CredentialProvider, QuotaMutation, QuotaQuery, RequestHandle};
use crate::error::{AutomationError, ErrorKind, Result};

pub const SKIP_REASON_ALREADY_SATISFIED: &str = "already satisfied";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuotaTarget {
    pub service_code: String,
    pub quota_code: String,
    pub desired_value: f64,
}

impl QuotaTarget {
    pub fn new(
        service_code: impl Into<String>,
        quota_code: impl Into<String>,
        desired_value: f64,
    ) -> Self {
        Self {
            service_code: service_code.into(),
            quota_code: quota_code.into(),
            desired_value,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.service_code.trim().is_empty() {
            return Err(AutomationError::Configuration(
                "quota target service_code cannot be empty".to_string(),
            ));
        }
        if self.quota_code.trim().is_empty() {
            return Err(AutomationError::Configuration(format!(
                "quota target for service '{}' has an empty quota_code",
                self.service_code
            )));
        }
        if !self.desired_value.is_finite() || self.desired_value <= 0.0 {
            return Err(AutomationError::Configuration(format!(
                "quota target {}/{} must have a positive desired_value",
                self.service_code, self.quota_code
            )));
        }
        Ok(())
    }
}

/// Quota increases requested for every newly created account.
pub fn default_quota_targets() -> Vec<QuotaTarget> {
    vec![
        // Inbound or outbound rules per security group
        QuotaTarget::new("vpc", "L-0EA8095F", 500.0),
        // IAM roles per account
        QuotaTarget::new("iam", "L-FE177D64", 2000.0),
    ]
}

/// Point-in-time quota read. `None` means the provider reported no value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QuotaSnapshot {
    pub current_value: Option<f64>,
}

impl QuotaSnapshot {
    pub fn known(value: f64) -> Self {
        Self {
            current_value: Some(value),
        }
    }

    pub fn unknown() -> Self {
        Self {
            current_value: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureCause {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&AutomationError> for FailureCause {
    fn from(error: &AutomationError) -> Self {
        Self {
            kind: error.kind(),
            message: error.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconciliationOutcome {
    Skipped { reason: String },
    RequestSubmitted { request_handle: RequestHandle },
    Failed { cause: FailureCause },
}

impl ReconciliationOutcome {
    pub fn failed(error: &AutomationError) -> Self {
        Self::Failed {
            cause: FailureCause::from(error),
        }
    }

    pub fn failure_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failed { cause } => Some(cause.kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconciliationEntry {
    pub region: String,
    pub target: QuotaTarget,
    pub outcome: ReconciliationOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconciliationReport {
    pub account_id: String,
    pub entries: Vec<ReconciliationEntry>,
}

impl ReconciliationReport {
    pub fn submitted(&self) -> usize {
        self.count(|outcome| matches!(outcome, ReconciliationOutcome::RequestSubmitted { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, ReconciliationOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, ReconciliationOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&ReconciliationOutcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}

/// Drives reconciliation against injected credential and quota capabilities.
///
/// Holds no mutable state, so independent `(region, target)` pairs can be
/// reconciled in any order.
pub struct QuotaReconciler<'a> {
    credentials: &'a dyn CredentialProvider,
    query: &'a dyn QuotaQuery,
    mutation: &'a dyn QuotaMutation,
}

impl<'a> QuotaReconciler<'a> {
    pub fn new(
        credentials: &'a dyn CredentialProvider,
        query: &'a dyn QuotaQuery,
        mutation: &'a dyn QuotaMutation,
    ) -> Self {
        Self {
            credentials,
            query,
            mutation,
        }
    }

    /// Ensures `target` is at least its desired value in `region`.
    ///
    /// Makes at most one mutating call and never returns an error: failures
    /// become [`ReconciliationOutcome::Failed`] after being logged.
    pub fn reconcile(
        &self,
        account_id: &str,
        region: &str,
        target: &QuotaTarget,
    ) -> ReconciliationOutcome {
        let outcome = match self.try_reconcile(account_id, region, target) {
            Ok(outcome) => outcome,
            Err(error) => ReconciliationOutcome::failed(&error),
        };
        log_outcome(account_id, region, target, &outcome);
        outcome
    }

    /// Reconciles every `regions × targets` pair, regions outermost.
    pub fn reconcile_all(
        &self,
        account_id: &str,
        regions: &[String],
        targets: &[QuotaTarget],
    ) -> ReconciliationReport {
        let mut entries = Vec::with_capacity(regions.len() * targets.len());
        for region in regions {
            for target in targets {
                entries.push(ReconciliationEntry {
                    region: region.clone(),
                    target: target.clone(),
                    outcome: self.reconcile(account_id, region, target),
                });
            }
        }

        let report = ReconciliationReport {
            account_id: account_id.to_string(),
            entries,
        };
        info!(
            component = "quota_reconciler",
            event = "reconciliation_completed",
            account_id,
            submitted = report.submitted(),
            skipped = report.skipped(),
            failed = report.failed(),
        );
        report
    }

    fn try_reconcile(
        &self,
        account_id: &str,
        region: &str,
        target: &QuotaTarget,
    ) -> Result<ReconciliationOutcome> {
        let credentials = self.credentials.assume_scoped_role(account_id)?;
        let snapshot = self.query.get_quota(
            &credentials,
            region,
            &target.service_code,
            &target.quota_code,
        )?;

        let Some(current_value) = snapshot.current_value else {
            return Err(AutomationError::NotFound(format!(
                "no current value reported for {}/{} in {region}",
                target.service_code, target.quota_code
            )));
        };

        if current_value >= target.desired_value {
            return Ok(ReconciliationOutcome::Skipped {
                reason: SKIP_REASON_ALREADY_SATISFIED.to_string(),
            });
        }

        let request_handle = self.mutation.request_quota_increase(
            &credentials,
            region,
            &target.service_code,
            &target.quota_code,
            target.desired_value,
        )?;
        Ok(ReconciliationOutcome::RequestSubmitted { request_handle })
    }
}

fn log_outcome(
    account_id: &str,
    region: &str,
    target: &QuotaTarget,
    outcome: &ReconciliationOutcome,
) {
    let service_code = target.service_code.as_str();
    let quota_code = target.quota_code.as_str();
    let desired_value = target.desired_value;

    match outcome {
        ReconciliationOutcome::Skipped { reason } => info!(
            component = "quota_reconciler",
            event = "quota_skipped",
            account_id,
            region,
            service_code,
            quota_code,
            desired_value,
            reason = reason.as_str(),
        ),
        ReconciliationOutcome::RequestSubmitted { request_handle } => info!(
            component = "quota_reconciler",
            event = "quota_increase_requested",
            account_id,
            region,
            service_code,
            quota_code,
            desired_value,
            request_handle = request_handle.as_str(),
        ),
        ReconciliationOutcome::Failed { cause } => warn!(
            component = "quota_reconciler",
            event = "quota_reconcile_failed",
            account_id,
            region,
            service_code,
            quota_code,
            desired_value,
            error_kind = cause.kind.as_str(),
            error = cause.message.as_str(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_are_valid() {
        let targets = default_quota_targets();
        assert_eq!(targets.len(), 2);
        for target in &targets {
            target.validate().expect("default target should validate");
        }
    }

    #[test]
    fn validate_rejects_non_positive_desired_value() {
        let error = QuotaTarget::new("vpc", "L-0EA8095F", 0.0)
            .validate()
            .expect_err("target should fail");
        assert!(matches!(error, AutomationError::Configuration(_)));

        let error = QuotaTarget::new("vpc", "L-0EA8095F", f64::NAN)
            .validate()
            .expect_err("target should fail");
        assert!(matches!(error, AutomationError::Configuration(_)));
    }

    #[test]
    fn validate_rejects_blank_codes() {
        assert!(QuotaTarget::new(" ", "L-1", 1.0).validate().is_err());
        assert!(QuotaTarget::new("vpc", "", 1.0).validate().is_err());
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = ReconciliationOutcome::RequestSubmitted {
            request_handle: RequestHandle::new("req-1"),
        };
        let value = serde_json::to_value(&outcome).expect("outcome should serialize");
        assert_eq!(value["outcome"], "request_submitted");
        assert_eq!(value["request_handle"], "req-1");
    }

    #[test]
    fn report_counts_outcomes() {
        let target = QuotaTarget::new("vpc", "L-0EA8095F", 500.0);
        let report = ReconciliationReport {
            account_id: "111122223333".to_string(),
            entries: vec![
                ReconciliationEntry {
                    region: "us-east-1".to_string(),
                    target: target.clone(),
                    outcome: ReconciliationOutcome::Skipped {
                        reason: SKIP_REASON_ALREADY_SATISFIED.to_string(),
                    },
                },
                ReconciliationEntry {
                    region: "us-west-2".to_string(),
                    target,
                    outcome: ReconciliationOutcome::failed(&AutomationError::Transient(
                        "throttled".to_string(),
                    )),
                },
            ],
        };

        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.submitted(), 0);
    }
}
