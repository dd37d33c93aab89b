use account_automation_core::collaborators::{
    QuotaMutation, QuotaQuery, RequestHandle, ScopedCredentials,
};
use account_automation_core::error::{AutomationError, Result};
use account_automation_core::quota::QuotaSnapshot;
use aws_sdk_servicequotas::config::Region;

use super::provider_error::classify_sdk_error;
use super::{block_on, sdk_credentials};

/// Service Quotas client that builds a region- and account-scoped SDK client per call.
pub struct ServiceQuotasClient {
    sdk_config: aws_config::SdkConfig,
}

impl ServiceQuotasClient {
    pub fn new(sdk_config: aws_config::SdkConfig) -> Self {
        Self { sdk_config }
    }

    fn scoped_client(
        &self,
        credentials: &ScopedCredentials,
        region: &str,
    ) -> aws_sdk_servicequotas::Client {
        let config = aws_sdk_servicequotas::config::Builder::from(&self.sdk_config)
            .region(Region::new(region.to_string()))
            .credentials_provider(sdk_credentials(credentials))
            .build();
        aws_sdk_servicequotas::Client::from_conf(config)
    }
}

impl QuotaQuery for ServiceQuotasClient {
    fn get_quota(
        &self,
        credentials: &ScopedCredentials,
        region: &str,
        service_code: &str,
        quota_code: &str,
    ) -> Result<QuotaSnapshot> {
        let client = self.scoped_client(credentials, region);
        let output = block_on(async {
            client
                .get_service_quota()
                .service_code(service_code)
                .quota_code(quota_code)
                .send()
                .await
        })
        .map_err(|error| classify_sdk_error("servicequotas:GetServiceQuota", &error))?;

        Ok(QuotaSnapshot {
            current_value: output.quota().and_then(|quota| quota.value()),
        })
    }
}

impl QuotaMutation for ServiceQuotasClient {
    fn request_quota_increase(
        &self,
        credentials: &ScopedCredentials,
        region: &str,
        service_code: &str,
        quota_code: &str,
        desired_value: f64,
    ) -> Result<RequestHandle> {
        let client = self.scoped_client(credentials, region);
        let output = block_on(async {
            client
                .request_service_quota_increase()
                .service_code(service_code)
                .quota_code(quota_code)
                .desired_value(desired_value)
                .send()
                .await
        })
        .map_err(|error| {
            classify_sdk_error("servicequotas:RequestServiceQuotaIncrease", &error)
        })?;

        output
            .requested_quota()
            .and_then(|requested| requested.id())
            .map(RequestHandle::new)
            .ok_or_else(|| {
                AutomationError::Transient(format!(
                    "servicequotas:RequestServiceQuotaIncrease returned no request id for \
                     {service_code}/{quota_code} in {region}"
                ))
            })
    }
}
