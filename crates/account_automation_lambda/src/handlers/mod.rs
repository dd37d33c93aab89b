pub mod az_alignment;
pub mod enable_support;
pub mod limit_increase;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATUS_PROCESSED: &str = "processed";
pub const STATUS_IGNORED: &str = "ignored";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_CASE_OPENED: &str = "case_opened";

/// Invocation result returned to the Lambda runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandlerResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub processed_at: String,
    pub details: Value,
}

impl HandlerResponse {
    pub fn new(status: &str, account_id: Option<String>, details: Value) -> Self {
        Self {
            status: status.to_string(),
            account_id,
            processed_at: Utc::now().to_rfc3339(),
            details,
        }
    }

    pub fn ignored(state: String) -> Self {
        Self::new(STATUS_IGNORED, None, serde_json::json!({ "state": state }))
    }
}
