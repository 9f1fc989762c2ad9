use std::sync::Arc;

use story_weaver_api::{clients::openai::OpenAiClient, http::handler::handle, StoryConfig};
use tracing_subscriber::EnvFilter;
use vercel_runtime::{run, Error, Request};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .without_time()
        .init();

    // Fail the cold start when GAIA_* is incomplete; nothing can be served without it.
    let config = StoryConfig::from_env()?;
    tracing::info!(endpoint = %config.base_url, model = %config.model, "generate-story ready");
    let client = Arc::new(OpenAiClient::new(&config)?);

    run(move |req: Request| {
        let client = Arc::clone(&client);
        async move { Ok(handle(req, client.as_ref()).await?) }
    })
    .await
}
