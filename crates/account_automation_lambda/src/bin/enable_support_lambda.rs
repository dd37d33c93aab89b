use account_automation_core::config::EnableSupportConfig;
use account_automation_lambda::adapters::sts::StsCredentialProvider;
use account_automation_lambda::adapters::support::SupportCenterClient;
use account_automation_lambda::handlers::enable_support::handle_enable_support_event;
use account_automation_lambda::handlers::HandlerResponse;
use account_automation_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    config: &EnableSupportConfig,
    credentials: &StsCredentialProvider,
    support: &SupportCenterClient,
) -> Result<HandlerResponse, Error> {
    handle_enable_support_event(event.payload, config, credentials, support).map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = EnableSupportConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let credentials = StsCredentialProvider::new(&aws_config, config.role.clone());
    let support = SupportCenterClient::new(aws_config);

    let config = &config;
    let credentials = &credentials;
    let support = &support;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, config, credentials, support).await
    }))
    .await
}
