use crate::models::story::{StoryParams, StoryTone};

/// Builds the storyteller prompt. Optional lines appear in a fixed order and
/// only when the matching field is present.
pub fn compose_prompt(params: &StoryParams) -> String {
    let mut prompt = format!(
        "You are a master storyteller. Based on the following elements, write a {length} story in the {genre} genre.\n\
         The story should be approximately {words} words and have a clear beginning, middle, and end.\n\
         \n\
         Core Idea/Premise: {core_idea}\n",
        length = params.length.as_str(),
        genre = params.genre,
        words = params.length.target_words(),
        core_idea = params.core_idea,
    );

    if let Some(protagonist) = &params.protagonist {
        prompt.push_str(&format!("\nMain Character (Protagonist): {protagonist}"));
    }
    if let Some(conflict) = &params.key_conflict {
        prompt.push_str(&format!("\nKey Conflict/Challenge: {conflict}"));
    }
    if let Some(vibe) = &params.world_vibe {
        prompt.push_str(&format!("\nSetting's Atmosphere/Vibe: {vibe}"));
    }
    if params.tone != StoryTone::Any {
        prompt.push_str(&format!("\nDesired Tone: {}", params.tone.as_str()));
    }

    prompt.push_str(
        "\n\nFocus on making the story engaging, well-structured, and imaginative. \
         Bring the characters and world to life.\nBegin the story now:\n",
    );
    prompt
}
