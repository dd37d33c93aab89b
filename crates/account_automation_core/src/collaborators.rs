//! Capabilities consumed by the reconciler and the support case handlers.
//!
//! Implementations are synchronous. AWS-backed versions live in
//! `account_automation_lambda::adapters`; tests substitute in-memory fakes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quota::QuotaSnapshot;
use crate::support_case::SupportCase;

/// Time-limited credentials scoped to a single target account.
#[derive(Clone, PartialEq, Eq)]
pub struct ScopedCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for ScopedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Correlation identifier returned for a submitted quota increase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RequestHandle(pub String);

impl RequestHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait CredentialProvider {
    /// Fails with `AutomationError::Authorization` when the role cannot be assumed.
    fn assume_scoped_role(&self, account_id: &str) -> Result<ScopedCredentials>;
}

pub trait QuotaQuery {
    fn get_quota(
        &self,
        credentials: &ScopedCredentials,
        region: &str,
        service_code: &str,
        quota_code: &str,
    ) -> Result<QuotaSnapshot>;
}

pub trait QuotaMutation {
    fn request_quota_increase(
        &self,
        credentials: &ScopedCredentials,
        region: &str,
        service_code: &str,
        quota_code: &str,
        desired_value: f64,
    ) -> Result<RequestHandle>;
}

pub trait SupportCaseFiler {
    /// Opens the case and returns the provider's case id.
    fn create_case(&self, credentials: &ScopedCredentials, case: &SupportCase) -> Result<String>;

    /// Looks up the human-facing display id of an open case.
    fn describe_case(
        &self,
        credentials: &ScopedCredentials,
        case_id: &str,
    ) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let credentials = ScopedCredentials {
            access_key_id: "ASIAEXAMPLE".to_string(),
            secret_access_key: "very-secret".to_string(),
            session_token: "session-token".to_string(),
            expires_at: None,
        };

        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("ASIAEXAMPLE"));
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("session-token"));
    }
}
