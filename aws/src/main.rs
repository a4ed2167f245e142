//! runner-killswitch: AWS Lambda adapter
//!
//! Subscribed to the budget alert topic. Each invocation disables the
//! self-hosted runners and returns a fixed success body; any failure is
//! returned to the Lambda runtime so the invocation is marked failed.
//! Uses a single-threaded tokio runtime; every step runs sequentially.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use runner_killswitch_core::config::Config;
use runner_killswitch_core::disable::{self, DisableResponse};

mod platform;

use platform::{ProcessEnv, ReqwestHttpClient, SsmSecretStore, SystemClock};

/// Clients built once per cold start and reused by warm invocations
struct AppState {
    config: Config,
    store: SsmSecretStore,
    http: ReqwestHttpClient,
    clock: SystemClock,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    // RUST_LOG overrides the default level
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _tracing = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().without_time())
        .with(env_filter)
        .try_init();

    let config = Config::from_env(&ProcessEnv)?;
    tracing::info!(
        region = %config.region,
        prefix = %config.prefix,
        owner = %config.github_owner,
        repo = %config.github_repo,
        api_base = %config.github_api_base,
        "runner-killswitch configured"
    );

    let state = Arc::new(AppState {
        store: SsmSecretStore::new(&config.region).await,
        http: ReqwestHttpClient::new()?,
        clock: SystemClock,
        config,
    });

    run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let state = state.clone();
        async move { function_handler(event, &state).await }
    }))
    .await
}

async fn function_handler(
    event: LambdaEvent<serde_json::Value>,
    state: &AppState,
) -> Result<DisableResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "invocation started");

    let response = disable::handle(
        &event.payload,
        &state.config,
        &state.store,
        &state.http,
        &state.clock,
    )
    .await?;

    Ok(response)
}
