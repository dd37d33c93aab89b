pub mod provider_error;
pub mod service_quotas;
pub mod sts;
pub mod support;

use std::future::Future;
use std::time::SystemTime;

use account_automation_core::collaborators::ScopedCredentials;
use aws_sdk_servicequotas::config::Credentials;

pub const CREDENTIALS_PROVIDER_NAME: &str = "account-automation-assumed-role";

/// Runs an SDK future to completion from synchronous collaborator code.
///
/// Requires a multi-threaded tokio runtime, which the Lambda binaries provide.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Static SDK credentials for a role assumed in the target account.
pub(crate) fn sdk_credentials(credentials: &ScopedCredentials) -> Credentials {
    Credentials::new(
        credentials.access_key_id.clone(),
        credentials.secret_access_key.clone(),
        Some(credentials.session_token.clone()),
        credentials.expires_at.map(SystemTime::from),
        CREDENTIALS_PROVIDER_NAME,
    )
}
