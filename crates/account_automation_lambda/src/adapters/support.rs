use account_automation_core::collaborators::{ScopedCredentials, SupportCaseFiler};
use account_automation_core::error::{AutomationError, Result};
use account_automation_core::support_case::{SupportCase, SUPPORT_API_REGION};
use aws_sdk_support::config::Region;

use super::provider_error::classify_sdk_error;
use super::{block_on, sdk_credentials};

pub struct SupportCenterClient {
    sdk_config: aws_config::SdkConfig,
}

impl SupportCenterClient {
    pub fn new(sdk_config: aws_config::SdkConfig) -> Self {
        Self { sdk_config }
    }

    fn scoped_client(&self, credentials: &ScopedCredentials) -> aws_sdk_support::Client {
        let config = aws_sdk_support::config::Builder::from(&self.sdk_config)
            .region(Region::new(SUPPORT_API_REGION))
            .credentials_provider(sdk_credentials(credentials))
            .build();
        aws_sdk_support::Client::from_conf(config)
    }
}

impl SupportCaseFiler for SupportCenterClient {
    fn create_case(&self, credentials: &ScopedCredentials, case: &SupportCase) -> Result<String> {
        let client = self.scoped_client(credentials);
        let output = block_on(async {
            client
                .create_case()
                .subject(&case.subject)
                .communication_body(&case.communication_body)
                .service_code(&case.service_code)
                .severity_code(&case.severity_code)
                .category_code(&case.category_code)
                .issue_type(&case.issue_type)
                .language(&case.language)
                .set_cc_email_addresses(Some(case.cc_email_addresses.clone()))
                .send()
                .await
        })
        .map_err(|error| classify_sdk_error("support:CreateCase", &error))?;

        output.case_id().map(str::to_string).ok_or_else(|| {
            AutomationError::Transient("support:CreateCase returned no case id".to_string())
        })
    }

    fn describe_case(
        &self,
        credentials: &ScopedCredentials,
        case_id: &str,
    ) -> Result<Option<String>> {
        let client = self.scoped_client(credentials);
        let output = block_on(async {
            client
                .describe_cases()
                .case_id_list(case_id)
                .send()
                .await
        })
        .map_err(|error| classify_sdk_error("support:DescribeCases", &error))?;

        Ok(output
            .cases()
            .first()
            .and_then(|details| details.display_id())
            .map(str::to_string))
    }
}
