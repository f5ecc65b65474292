//! Match results.

use std::collections::BTreeMap;
use std::fmt;

use polyglot_grammar::{RoleValue, SemanticRole};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pattern::PatternVariant;

/// The language-neutral result of a successful match: the command's action
/// and the value of every bound or defaulted role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalCommand {
    pub action: String,
    pub roles: BTreeMap<SemanticRole, RoleValue>,
    /// The pattern that matched.
    pub pattern_id: String,
    /// The surface form that matched. A negated event handler is recognizable
    /// from this alone.
    pub variant: PatternVariant,
}

impl CanonicalCommand {
    pub fn role(&self, role: SemanticRole) -> Option<&RoleValue> {
        self.roles.get(&role)
    }

    pub fn is_negated(&self) -> bool {
        self.variant == PatternVariant::NegatedEvent
    }
}

impl fmt::Display for CanonicalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)?;
        for (role, value) in &self.roles {
            write!(f, " {role}={value}")?;
        }
        Ok(())
    }
}

/// No pattern accepted the input.
///
/// Carries how far the most successful attempt got, which is usually the
/// best hint at what the input was meant to be.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "no {language} pattern matched the input ({tried_pattern_count} tried, furthest reached token {furthest_token_index})"
)]
pub struct NoMatch {
    pub language: String,
    /// The pattern that consumed the most input before failing.
    pub furthest_pattern_id: Option<String>,
    /// How many leading tokens that pattern consumed.
    pub furthest_token_index: usize,
    pub tried_pattern_count: usize,
}
