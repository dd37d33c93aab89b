use account_automation_core::collaborators::{CredentialProvider, SupportCaseFiler};
use account_automation_core::config::EnableSupportConfig;
use account_automation_core::contract::{parse_account_event, AccountLifecycle};
use account_automation_core::error::Result;
use account_automation_core::support_case::{enable_support_case, CaseReceipt};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{HandlerResponse, STATUS_CASE_OPENED};

pub fn handle_enable_support_event(
    event: Value,
    config: &EnableSupportConfig,
    credentials: &dyn CredentialProvider,
    filer: &dyn SupportCaseFiler,
) -> Result<HandlerResponse> {
    debug!(component = "enable_support", event = "event_received", payload = %event);

    let account_id = match parse_account_event(event)? {
        AccountLifecycle::Succeeded { account_id } => account_id,
        AccountLifecycle::Ignored { state } => {
            info!(
                component = "enable_support",
                event = "account_creation_not_succeeded",
                state = state.as_str(),
            );
            return Ok(HandlerResponse::ignored(state));
        }
    };

    let scoped = credentials.assume_scoped_role(&account_id)?;
    let case = enable_support_case(&account_id, config);
    let case_id = filer.create_case(&scoped, &case)?;

    // The case is already open at this point; a failed lookup only costs the display id.
    let display_id = match filer.describe_case(&scoped, &case_id) {
        Ok(display_id) => display_id,
        Err(error) => {
            warn!(
                component = "enable_support",
                event = "case_lookup_failed",
                account_id = account_id.as_str(),
                case_id = case_id.as_str(),
                error = %error,
            );
            None
        }
    };

    info!(
        component = "enable_support",
        event = "case_opened",
        account_id = account_id.as_str(),
        support_plan = config.support_plan.as_str(),
        case_id = case_id.as_str(),
        display_id = display_id.as_deref().unwrap_or("unknown"),
    );

    let receipt = CaseReceipt {
        case_id,
        display_id,
    };
    Ok(HandlerResponse::new(
        STATUS_CASE_OPENED,
        Some(account_id),
        json!({ "case": receipt }),
    ))
}
