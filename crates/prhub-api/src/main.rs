use prhub_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    prhub_api::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage backend, validator client, routes)
    let (_state, router) = prhub_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    prhub_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
