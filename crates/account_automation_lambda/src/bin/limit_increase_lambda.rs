use account_automation_core::config::LimitIncreaseConfig;
use account_automation_lambda::adapters::service_quotas::ServiceQuotasClient;
use account_automation_lambda::adapters::sts::StsCredentialProvider;
use account_automation_lambda::handlers::limit_increase::handle_limit_increase_event;
use account_automation_lambda::handlers::HandlerResponse;
use account_automation_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = LimitIncreaseConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let credentials = StsCredentialProvider::new(&aws_config, config.role.clone());
    let quotas = ServiceQuotasClient::new(aws_config);

    let config = &config;
    let credentials = &credentials;
    let quotas = &quotas;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<HandlerResponse, Error>(handle_limit_increase_event(
            event.payload,
            config,
            credentials,
            quotas,
            quotas,
        ))
    }))
    .await
}
