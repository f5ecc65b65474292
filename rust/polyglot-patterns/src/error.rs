//! Error types for pattern generation.

use polyglot_grammar::GrammarError;
use thiserror::Error;

/// Configuration errors detected while generating patterns. Each one halts
/// generation for the affected (command, language) pair.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("pattern id '{id}' was generated twice")]
    DuplicatePatternId { id: String },

    #[error(
        "required role '{role}' of command '{action}' has no marker and no {word_order} position in language '{language}', so it cannot be told apart from other unmarked roles"
    )]
    UnexpressibleRole {
        action: String,
        language: String,
        role: String,
        word_order: String,
    },

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}
