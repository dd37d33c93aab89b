//! STS-backed role assumption into newly created member accounts.

use account_automation_core::collaborators::{CredentialProvider, ScopedCredentials};
use account_automation_core::config::RoleConfig;
use account_automation_core::error::{AutomationError, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::block_on;
use super::provider_error::classify_assume_role_sdk_error;

pub struct StsCredentialProvider {
    client: aws_sdk_sts::Client,
    role: RoleConfig,
}

impl StsCredentialProvider {
    pub fn new(sdk_config: &aws_config::SdkConfig, role: RoleConfig) -> Self {
        Self {
            client: aws_sdk_sts::Client::new(sdk_config),
            role,
        }
    }
}

impl CredentialProvider for StsCredentialProvider {
    fn assume_scoped_role(&self, account_id: &str) -> Result<ScopedCredentials> {
        let role_arn = self.role.role_arn(account_id);
        let client = self.client.clone();
        let session_name = self.role.session_name.clone();

        let output = block_on(async {
            client
                .assume_role()
                .role_arn(&role_arn)
                .role_session_name(session_name)
                .send()
                .await
        })
        .map_err(|error| classify_assume_role_sdk_error(&error))?;

        let credentials = output.credentials().ok_or_else(|| {
            AutomationError::Authorization(format!(
                "sts:AssumeRole returned no credentials for {role_arn}"
            ))
        })?;
        let expiration = credentials.expiration();
        let expires_at: Option<DateTime<Utc>> =
            DateTime::from_timestamp(expiration.secs(), expiration.subsec_nanos());

        debug!(
            component = "sts_credentials",
            event = "role_assumed",
            account_id,
            role_arn = role_arn.as_str(),
            expires_at = ?expires_at,
        );

        Ok(ScopedCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
            expires_at,
        })
    }
}
