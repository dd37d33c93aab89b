use account_automation_core::collaborators::{CredentialProvider, SupportCaseFiler};
use account_automation_core::config::AzAlignmentConfig;
use account_automation_core::contract::{parse_account_event, AccountLifecycle};
use account_automation_core::error::Result;
use account_automation_core::support_case::{az_alignment_case, CaseReceipt};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{HandlerResponse, STATUS_CASE_OPENED};

/// Opens a support case aligning the new account's AZ mappings with the
/// reference account.
pub fn handle_az_alignment_event(
    event: Value,
    config: &AzAlignmentConfig,
    credentials: &dyn CredentialProvider,
    filer: &dyn SupportCaseFiler,
) -> Result<HandlerResponse> {
    debug!(component = "az_alignment", event = "event_received", payload = %event);

    let account_id = match parse_account_event(event)? {
        AccountLifecycle::Succeeded { account_id } => account_id,
        AccountLifecycle::Ignored { state } => {
            info!(
                component = "az_alignment",
                event = "account_creation_not_succeeded",
                state = state.as_str(),
            );
            return Ok(HandlerResponse::ignored(state));
        }
    };

    info!(
        component = "az_alignment",
        event = "case_requested",
        account_id = account_id.as_str(),
        reference_account = config.reference_account.as_str(),
        regions = %config.regions.join(", "),
    );

    let scoped = credentials.assume_scoped_role(&account_id)?;
    let case = az_alignment_case(&account_id, config);
    let case_id = filer.create_case(&scoped, &case)?;

    info!(
        component = "az_alignment",
        event = "case_opened",
        account_id = account_id.as_str(),
        case_id = case_id.as_str(),
    );

    let receipt = CaseReceipt {
        case_id,
        display_id: None,
    };
    Ok(HandlerResponse::new(
        STATUS_CASE_OPENED,
        Some(account_id),
        json!({ "case": receipt }),
    ))
}
