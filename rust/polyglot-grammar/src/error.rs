//! Error types for grammar data.

use thiserror::Error;

/// Errors raised while loading or validating language profiles and command
/// schemas. All of them indicate a data-authoring bug rather than a runtime
/// condition.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("unknown semantic role '{0}'")]
    UnknownRole(String),

    #[error("unknown word order '{0}' (expected SVO, SOV or VSO)")]
    UnknownWordOrder(String),

    #[error("keyword translation for '{action}' in language '{language}' has an empty primary form")]
    EmptyKeyword { language: String, action: String },

    #[error("language profile '{0}' is already registered")]
    DuplicateProfile(String),

    #[error("command schema '{0}' is already registered")]
    DuplicateSchema(String),

    #[error("command '{action}' declares role '{role}' more than once")]
    DuplicateRole { action: String, role: String },

    #[error(
        "marker override for role '{role}' of command '{action}' names unregistered language '{language}'"
    )]
    UnknownOverrideLanguage {
        action: String,
        role: String,
        language: String,
    },

    #[error("language profile has an empty code")]
    EmptyLanguageCode,

    #[error("failed to decode grammar data: {0}")]
    Json(#[from] serde_json::Error),
}
