use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Extra tokens granted on top of the word target for prompt echo and structure.
pub const STORY_TOKEN_BUFFER: u32 = 250;

const MIN_CORE_IDEA_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryLength {
    Short,
    Medium,
    Long,
}

impl StoryLength {
    pub const ALL: [StoryLength; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    pub fn target_words(self) -> u32 {
        match self {
            Self::Short => 300,
            Self::Medium => 800,
            Self::Long => 1500,
        }
    }

    /// Upper bound on generated tokens for this tier.
    pub fn max_tokens(self) -> u32 {
        self.target_words() + STORY_TOKEN_BUFFER
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryTone {
    #[default]
    Any,
    Humorous,
    Serious,
    Suspenseful,
    Whimsical,
    Dark,
}

impl StoryTone {
    pub const ALL: [StoryTone; 6] = [
        Self::Any,
        Self::Humorous,
        Self::Serious,
        Self::Suspenseful,
        Self::Whimsical,
        Self::Dark,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Humorous => "humorous",
            Self::Serious => "serious",
            Self::Suspenseful => "suspenseful",
            Self::Whimsical => "whimsical",
            Self::Dark => "dark",
        }
    }
}

/// Validated story parameters. Only produced by [`StoryParams::from_payload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryParams {
    pub core_idea: String,
    pub genre: String,
    pub length: StoryLength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protagonist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_conflict: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_vibe: Option<String>,
    pub tone: StoryTone,
}

impl StoryParams {
    /// Validates an arbitrary JSON payload, collecting every failing field.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let Some(obj) = payload.as_object() else {
            return Err(ValidationErrors::form(format!(
                "Expected object, received {}",
                json_type(payload)
            )));
        };

        let mut errors = ValidationErrors::default();

        let core_idea = match required_text(obj, "coreIdea", &mut errors) {
            Some(v) if v.chars().count() < MIN_CORE_IDEA_CHARS => {
                errors.add(
                    "coreIdea",
                    "Please provide a more detailed core idea (min 10 characters).",
                );
                None
            }
            other => other,
        };
        let genre = match required_text(obj, "genre", &mut errors) {
            Some(v) if v.is_empty() => {
                errors.add("genre", "Genre is required");
                None
            }
            other => other,
        };
        let length = match obj.get("length") {
            None => {
                errors.add("length", "Required");
                None
            }
            Some(v) => enum_value(v, "length", &StoryLength::ALL, StoryLength::as_str, &mut errors),
        };
        let protagonist = optional_text(obj, "protagonist", &mut errors);
        let key_conflict = optional_text(obj, "keyConflict", &mut errors);
        let world_vibe = optional_text(obj, "worldVibe", &mut errors);
        let tone = match obj.get("tone") {
            None => Some(StoryTone::Any),
            Some(v) => enum_value(v, "tone", &StoryTone::ALL, StoryTone::as_str, &mut errors),
        };

        match (core_idea, genre, length, tone) {
            (Some(core_idea), Some(genre), Some(length), Some(tone)) if errors.is_empty() => {
                Ok(Self {
                    core_idea,
                    genre,
                    length,
                    protagonist,
                    key_conflict,
                    world_vibe,
                    tone,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Field-keyed validation failures, shaped for the `details` member of a 400 body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            form_errors: vec![message.into()],
            field_errors: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.field_errors.get(name).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.form_errors.clone();
        for (field, messages) in &self.field_errors {
            parts.push(format!("{field}: {}", messages.join(", ")));
        }
        f.write_str(&parts.join("; "))
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn text_value(v: &Value, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        other => {
            errors.add(field, format!("Expected string, received {}", json_type(other)));
            None
        }
    }
}

fn required_text(obj: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    match obj.get(field) {
        None => {
            errors.add(field, "Required");
            None
        }
        Some(v) => text_value(v, field, errors),
    }
}

// Empty strings count as absent: the form submits "" for untouched inputs.
fn optional_text(obj: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    obj.get(field)
        .and_then(|v| text_value(v, field, errors))
        .filter(|s| !s.is_empty())
}

fn enum_value<T: Copy>(
    v: &Value,
    field: &str,
    variants: &[T],
    name: fn(T) -> &'static str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let raw = text_value(v, field, errors)?;
    let found = variants.iter().copied().find(|variant| name(*variant) == raw);
    if found.is_none() {
        let expected = variants
            .iter()
            .map(|variant| format!("'{}'", name(*variant)))
            .collect::<Vec<_>>()
            .join(" | ");
        errors.add(
            field,
            format!("Invalid enum value. Expected {expected}, received '{raw}'"),
        );
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "coreIdea": "A detective who talks to ghosts",
            "genre": "mystery",
            "length": "short"
        })
    }

    #[test]
    fn accepts_minimal_payload_with_default_tone() {
        let params = StoryParams::from_payload(&minimal()).unwrap();
        assert_eq!(params.core_idea, "A detective who talks to ghosts");
        assert_eq!(params.genre, "mystery");
        assert_eq!(params.length, StoryLength::Short);
        assert_eq!(params.tone, StoryTone::Any);
        assert!(params.protagonist.is_none());
        assert!(params.key_conflict.is_none());
        assert!(params.world_vibe.is_none());
    }

    #[test]
    fn accepts_full_payload() {
        let payload = json!({
            "coreIdea": "A lighthouse keeper finds a map",
            "genre": "Adventure",
            "length": "long",
            "protagonist": "Old Mara",
            "keyConflict": "A storm is coming",
            "worldVibe": "Salt-bitten coast",
            "tone": "suspenseful",
            "extra": 42
        });
        let params = StoryParams::from_payload(&payload).unwrap();
        assert_eq!(params.length, StoryLength::Long);
        assert_eq!(params.protagonist.as_deref(), Some("Old Mara"));
        assert_eq!(params.key_conflict.as_deref(), Some("A storm is coming"));
        assert_eq!(params.world_vibe.as_deref(), Some("Salt-bitten coast"));
        assert_eq!(params.tone, StoryTone::Suspenseful);
    }

    #[test]
    fn short_core_idea_names_field() {
        let mut payload = minimal();
        payload["coreIdea"] = json!("too short");
        let errors = StoryParams::from_payload(&payload).unwrap_err();
        assert_eq!(
            errors.field("coreIdea").unwrap(),
            ["Please provide a more detailed core idea (min 10 characters)."]
        );
        assert_eq!(errors.field_errors.len(), 1);
    }

    #[test]
    fn core_idea_length_counts_characters_not_bytes() {
        let mut payload = minimal();
        // 9 characters, 18 bytes
        payload["coreIdea"] = json!("ééééééééé");
        assert!(StoryParams::from_payload(&payload).is_err());
        payload["coreIdea"] = json!("éééééééééé");
        assert!(StoryParams::from_payload(&payload).is_ok());
    }

    #[test]
    fn reports_every_failing_field() {
        let payload = json!({
            "coreIdea": 7,
            "genre": "",
            "length": "epic",
            "tone": "grim"
        });
        let errors = StoryParams::from_payload(&payload).unwrap_err();
        assert_eq!(errors.field("coreIdea").unwrap(), ["Expected string, received number"]);
        assert_eq!(errors.field("genre").unwrap(), ["Genre is required"]);
        assert_eq!(
            errors.field("length").unwrap(),
            ["Invalid enum value. Expected 'short' | 'medium' | 'long', received 'epic'"]
        );
        assert!(errors.field("tone").unwrap()[0].contains("received 'grim'"));
    }

    #[test]
    fn missing_required_fields_are_required() {
        let errors = StoryParams::from_payload(&json!({})).unwrap_err();
        for field in ["coreIdea", "genre", "length"] {
            assert_eq!(errors.field(field).unwrap(), ["Required"], "{field}");
        }
        assert!(errors.field("tone").is_none());
    }

    #[test]
    fn non_object_payload_is_form_error() {
        let errors = StoryParams::from_payload(&json!(["a"])).unwrap_err();
        assert_eq!(errors.form_errors, vec!["Expected object, received array"]);
        assert!(errors.field_errors.is_empty());
    }

    #[test]
    fn empty_optional_fields_become_absent() {
        let mut payload = minimal();
        payload["protagonist"] = json!("");
        payload["keyConflict"] = json!("");
        payload["worldVibe"] = json!("  ");
        let params = StoryParams::from_payload(&payload).unwrap();
        assert!(params.protagonist.is_none());
        assert!(params.key_conflict.is_none());
        assert_eq!(params.world_vibe.as_deref(), Some("  "));
    }

    #[test]
    fn null_optional_field_is_rejected() {
        let mut payload = minimal();
        payload["protagonist"] = Value::Null;
        let errors = StoryParams::from_payload(&payload).unwrap_err();
        assert_eq!(errors.field("protagonist").unwrap(), ["Expected string, received null"]);
    }

    #[test]
    fn token_budget_is_target_plus_buffer() {
        assert_eq!(StoryLength::Short.max_tokens(), 550);
        assert_eq!(StoryLength::Medium.max_tokens(), 1050);
        assert_eq!(StoryLength::Long.max_tokens(), 1750);
    }

    #[test]
    fn validation_errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::default();
        errors.add("genre", "Required");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"formErrors": [], "fieldErrors": {"genre": ["Required"]}})
        );
        assert_eq!(errors.to_string(), "genre: Required");
    }
}
