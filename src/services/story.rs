use serde_json::Value;

use crate::{
    clients::{CompletionProvider, CompletionRequest},
    error::{AppError, Result},
    models::story::StoryParams,
    services::prompt::compose_prompt,
};

/// Validates `payload`, composes the prompt and asks `provider` for the story.
/// Invalid input never reaches the provider.
pub async fn generate_story(provider: &dyn CompletionProvider, payload: &Value) -> Result<String> {
    let params = StoryParams::from_payload(payload).map_err(AppError::Validation)?;
    let prompt = compose_prompt(&params);
    tracing::info!(
        genre = %params.genre,
        length = params.length.as_str(),
        tone = params.tone.as_str(),
        "generating story"
    );
    provider
        .complete(CompletionRequest {
            prompt,
            max_tokens: params.length.max_tokens(),
        })
        .await
}
