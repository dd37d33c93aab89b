use serde::{Deserialize, Serialize};

use crate::config::{AzAlignmentConfig, EnableSupportConfig};

/// The Support API is only served from this region.
pub const SUPPORT_API_REGION: &str = "us-east-1";
pub const CASE_LANGUAGE: &str = "en";
pub const CASE_SEVERITY_LOW: &str = "low";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupportCase {
    pub subject: String,
    pub communication_body: String,
    pub service_code: String,
    pub severity_code: String,
    pub category_code: String,
    pub issue_type: String,
    pub language: String,
    pub cc_email_addresses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseReceipt {
    pub case_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,
}

/// Asks the provider to align the new account's AZ mappings with the reference account.
pub fn az_alignment_case(account_id: &str, config: &AzAlignmentConfig) -> SupportCase {
    let reference_account = &config.reference_account;
    let subject = format!(
        "Please align account {account_id} to match the alignment of AZs in account {reference_account}"
    );
    let communication_body = format!("{subject} in regions {}.", config.regions.join(", "));

    SupportCase {
        subject,
        communication_body,
        service_code: "account-management".to_string(),
        severity_code: CASE_SEVERITY_LOW.to_string(),
        category_code: "billing".to_string(),
        issue_type: "technical".to_string(),
        language: CASE_LANGUAGE.to_string(),
        cc_email_addresses: config.cc_email_addresses.clone(),
    }
}

/// Asks the provider to put the new account on the payer's support plan.
pub fn enable_support_case(account_id: &str, config: &EnableSupportConfig) -> SupportCase {
    let communication_body = format!(
        "Hi AWS! Please enable {} on new account IDs {account_id} with the same support plan \
         as this Payer account. This case was created automatically - please resolve when done.",
        config.support_plan
    );

    SupportCase {
        subject: "Enable Enterprise Support on new accounts".to_string(),
        communication_body,
        service_code: "customer-account".to_string(),
        severity_code: CASE_SEVERITY_LOW.to_string(),
        category_code: "other-account-issues".to_string(),
        issue_type: "customer-service".to_string(),
        language: CASE_LANGUAGE.to_string(),
        cc_email_addresses: config.cc_email_addresses.clone(),
    }
}
