use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AutomationError, Result};

/// `createAccountStatus.state` value that triggers processing.
pub const ACCOUNT_CREATION_SUCCEEDED: &str = "SUCCEEDED";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountCreatedEvent {
    pub detail: AccountEventDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountEventDetail {
    #[serde(rename = "serviceEventDetails")]
    pub service_event_details: ServiceEventDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceEventDetails {
    #[serde(rename = "createAccountStatus")]
    pub create_account_status: CreateAccountStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateAccountStatus {
    pub state: String,
    /// Absent on some failed creations.
    #[serde(rename = "accountId", default)]
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "lifecycle", rename_all = "snake_case")]
pub enum AccountLifecycle {
    Succeeded { account_id: String },
    Ignored { state: String },
}

/// Classifies an EventBridge account-creation event.
///
/// Only the success sentinel yields [`AccountLifecycle::Succeeded`]; every other
/// state is a no-op for the handlers.
pub fn parse_account_event(event: Value) -> Result<AccountLifecycle> {
    let event = serde_json::from_value::<AccountCreatedEvent>(event)
        .map_err(|error| AutomationError::MalformedEvent(error.to_string()))?;
    let status = event.detail.service_event_details.create_account_status;

    if status.state != ACCOUNT_CREATION_SUCCEEDED {
        return Ok(AccountLifecycle::Ignored {
            state: status.state,
        });
    }

    let account_id = status.account_id.trim().to_string();
    if account_id.is_empty() {
        return Err(AutomationError::MalformedEvent(
            "accountId cannot be empty for a succeeded account creation".to_string(),
        ));
    }

    Ok(AccountLifecycle::Succeeded { account_id })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event(state: &str, account_id: &str) -> Value {
        json!({
            "source": "aws.organizations",
            "detail-type": "AWS Service Event via CloudTrail",
            "detail": {
                "eventName": "CreateAccountResult",
                "serviceEventDetails": {
                    "createAccountStatus": {
                        "id": "car-0123456789abcdef",
                        "state": state,
                        "accountName": "sandbox",
                        "accountId": account_id
                    }
                }
            }
        })
    }

    #[test]
    fn succeeded_event_yields_account_id() {
        let lifecycle =
            parse_account_event(event("SUCCEEDED", " 111122223333 ")).expect("event should parse");
        assert_eq!(
            lifecycle,
            AccountLifecycle::Succeeded {
                account_id: "111122223333".to_string()
            }
        );
    }

    #[test]
    fn other_states_are_ignored() {
        let lifecycle = parse_account_event(event("FAILED", "")).expect("event should parse");
        assert_eq!(
            lifecycle,
            AccountLifecycle::Ignored {
                state: "FAILED".to_string()
            }
        );
    }

    #[test]
    fn failed_event_without_account_id_is_ignored() {
        let lifecycle = parse_account_event(json!({
            "detail": {
                "serviceEventDetails": {
                    "createAccountStatus": {
                        "state": "FAILED",
                        "failureReason": "EMAIL_ALREADY_EXISTS"
                    }
                }
            }
        }))
        .expect("event should parse");
        assert!(matches!(lifecycle, AccountLifecycle::Ignored { .. }));
    }

    #[test]
    fn missing_status_is_malformed() {
        let error = parse_account_event(json!({"detail": {"serviceEventDetails": {}}}))
            .expect_err("event should fail");
        assert!(matches!(error, AutomationError::MalformedEvent(_)));
    }

    #[test]
    fn succeeded_event_without_account_id_is_malformed() {
        let error = parse_account_event(event("SUCCEEDED", "  ")).expect_err("event should fail");
        assert!(matches!(error, AutomationError::MalformedEvent(_)));
    }
}
