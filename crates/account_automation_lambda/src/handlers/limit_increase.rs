use account_automation_core::collaborators::{CredentialProvider, QuotaMutation, QuotaQuery};
use account_automation_core::config::LimitIncreaseConfig;
use account_automation_core::contract::{parse_account_event, AccountLifecycle};
use account_automation_core::quota::QuotaReconciler;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{HandlerResponse, STATUS_PROCESSED, STATUS_REJECTED};

/// Requests the configured quota increases for a newly created account.
///
/// Best effort: malformed events and per-quota failures are logged and
/// reported in the response, never returned as an invocation error.
pub fn handle_limit_increase_event(
    event: Value,
    config: &LimitIncreaseConfig,
    credentials: &dyn CredentialProvider,
    query: &dyn QuotaQuery,
    mutation: &dyn QuotaMutation,
) -> HandlerResponse {
    debug!(component = "limit_increase", event = "event_received", payload = %event);

    let account_id = match parse_account_event(event) {
        Ok(AccountLifecycle::Succeeded { account_id }) => account_id,
        Ok(AccountLifecycle::Ignored { state }) => {
            info!(
                component = "limit_increase",
                event = "account_creation_not_succeeded",
                state = state.as_str(),
            );
            return HandlerResponse::ignored(state);
        }
        Err(error) => {
            warn!(
                component = "limit_increase",
                event = "event_rejected",
                error = %error,
            );
            return HandlerResponse::new(
                STATUS_REJECTED,
                None,
                json!({
                    "error": "malformed_event",
                    "message": error.message(),
                }),
            );
        }
    };

    info!(
        component = "limit_increase",
        event = "quota_requests_started",
        account_id = account_id.as_str(),
        regions = config.regions.len(),
        targets = config.targets.len(),
    );

    let reconciler = QuotaReconciler::new(credentials, query, mutation);
    let report = reconciler.reconcile_all(&account_id, &config.regions, &config.targets);

    HandlerResponse::new(
        STATUS_PROCESSED,
        Some(account_id),
        json!({
            "submitted": report.submitted(),
            "skipped": report.skipped(),
            "failed": report.failed(),
            "entries": report.entries,
        }),
    )
}
