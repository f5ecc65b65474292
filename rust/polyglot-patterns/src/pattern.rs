//! Generated language patterns.
//!
//! A `LanguagePattern` is one fully generated surface form of a command in a
//! language: its token template, its priority in the corpus, and the rules
//! for recovering each role's value (including the default applied when an
//! optional role is omitted).

use std::collections::BTreeMap;
use std::fmt;

use polyglot_grammar::{RoleValue, SemanticRole};
use serde::{Deserialize, Serialize};

use crate::input::Token;
use crate::token::PatternToken;

/// Which generated surface form a pattern is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternVariant {
    /// Every role, optional ones wrapped in optional groups.
    Full,
    /// Required roles only.
    Simple,
    /// The event clause opens the sentence.
    EventFirst,
    /// Verb-final: the patient precedes the event clause.
    PatientFirst,
    /// Verb-final: patient and destination precede the event clause.
    PatientDestinationFirst,
    /// Verb-final event-first form with a fused multi-word event marker.
    CompactEvent,
    /// Verb-final: event and verb only; the patient takes its implicit default.
    EventOnly,
    /// Verb-final: a temporal clause ("click の 時") introduces the event.
    Temporal,
    /// Two required roles after the event clause.
    TwoRoleEventFirst,
    /// Verb-final two-role form led by the destination.
    TwoRoleDestinationFirst,
    /// Verb-initial: the command comes first, the event clause last.
    VerbFirst,
    /// Verb-initial: the event clause carries a negation marker.
    NegatedEvent,
    /// Verb-initial: a conjunction proclitic chains the event.
    Proclitic,
    /// Verb-initial two-role form with the event clause last.
    TwoRoleVerbFirst,
}

impl PatternVariant {
    /// The slug used in pattern ids.
    pub fn slug(&self) -> &'static str {
        match self {
            PatternVariant::Full => "full",
            PatternVariant::Simple => "simple",
            PatternVariant::EventFirst => "event-first",
            PatternVariant::PatientFirst => "patient-first",
            PatternVariant::PatientDestinationFirst => "patient-destination-first",
            PatternVariant::CompactEvent => "compact-event",
            PatternVariant::EventOnly => "event-only",
            PatternVariant::Temporal => "temporal",
            PatternVariant::TwoRoleEventFirst => "two-role-event-first",
            PatternVariant::TwoRoleDestinationFirst => "two-role-destination-first",
            PatternVariant::VerbFirst => "verb-first",
            PatternVariant::NegatedEvent => "negated-event",
            PatternVariant::Proclitic => "proclitic",
            PatternVariant::TwoRoleVerbFirst => "two-role-verb-first",
        }
    }

    /// Whether the variant is an event-handler form.
    pub fn is_event_handler(&self) -> bool {
        !matches!(self, PatternVariant::Full | PatternVariant::Simple)
    }
}

impl fmt::Display for PatternVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// How to recover one role's value from a matched pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRule {
    /// The marker that signals the role, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marker_alternatives: Vec<String>,
    /// Applied after matching when the role was not bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<RoleValue>,
}

/// One generated, prioritized surface form of a command in a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePattern {
    /// `{command}-{language}-{variant}`, unique across the corpus.
    pub id: String,
    pub language: String,
    pub command: String,
    pub variant: PatternVariant,
    pub priority: i32,
    pub tokens: Vec<PatternToken>,
    pub extraction: BTreeMap<SemanticRole, ExtractionRule>,
}

impl LanguagePattern {
    pub fn pattern_id(command: &str, language: &str, variant: PatternVariant) -> String {
        format!("{command}-{language}-{}", variant.slug())
    }

    /// A readable rendering of the template, e.g. `toggle {patient} [on {destination}]`.
    pub fn format(&self) -> String {
        self.tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every role the template can bind.
    pub fn roles(&self) -> Vec<SemanticRole> {
        self.tokens.iter().flat_map(PatternToken::roles).collect()
    }

    /// Produce an input token sequence this pattern accepts for `values`.
    ///
    /// Literals are spelled with their primary form, one token per word. An
    /// optional group is included when every role inside it has a value.
    /// Returns `None` when a role outside optional groups has no value.
    pub fn realize(&self, values: &BTreeMap<SemanticRole, RoleValue>) -> Option<Vec<Token>> {
        let mut output = Vec::new();
        realize_into(&self.tokens, values, &mut output)?;
        Some(output)
    }
}

fn realize_into(
    tokens: &[PatternToken],
    values: &BTreeMap<SemanticRole, RoleValue>,
    output: &mut Vec<Token>,
) -> Option<()> {
    for token in tokens {
        match token {
            PatternToken::Literal { value, .. } => {
                output.extend(value.split_whitespace().map(Token::word));
            }
            PatternToken::Role { role, .. } => {
                let value = values.get(role)?;
                output.push(Token::new(value.kind, value.text.as_str()));
            }
            PatternToken::Group { optional, tokens } => {
                let roles: Vec<SemanticRole> = tokens.iter().flat_map(PatternToken::roles).collect();
                let satisfied = roles.iter().all(|role| values.contains_key(role));
                if *optional && (roles.is_empty() || !satisfied) {
                    continue;
                }
                realize_into(tokens, values, output)?;
            }
        }
    }
    Some(())
}

impl fmt::Display for LanguagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.id, self.priority, self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_grammar::ValueKind;

    fn toggle_full() -> LanguagePattern {
        LanguagePattern {
            id: LanguagePattern::pattern_id("toggle", "en", PatternVariant::Full),
            language: "en".into(),
            command: "toggle".into(),
            variant: PatternVariant::Full,
            priority: 100,
            tokens: vec![
                PatternToken::literal("toggle"),
                PatternToken::role(SemanticRole::Patient),
                PatternToken::optional_group(vec![
                    PatternToken::literal("on"),
                    PatternToken::role(SemanticRole::Destination),
                ]),
            ],
            extraction: BTreeMap::new(),
        }
    }

    #[test]
    fn id_and_format() {
        let pattern = toggle_full();
        assert_eq!(pattern.id, "toggle-en-full");
        assert_eq!(pattern.format(), "toggle {patient} [on {destination}]");
        assert_eq!(
            pattern.roles(),
            vec![SemanticRole::Patient, SemanticRole::Destination]
        );
    }

    #[test]
    fn realize_skips_unfilled_optional_groups() {
        let pattern = toggle_full();
        let values = BTreeMap::from([(SemanticRole::Patient, RoleValue::selector(".active"))]);
        let tokens = pattern.realize(&values).unwrap();

        assert_eq!(
            tokens,
            vec![Token::word("toggle"), Token::new(ValueKind::Selector, ".active")]
        );
    }

    #[test]
    fn realize_fails_without_required_role() {
        assert!(toggle_full().realize(&BTreeMap::new()).is_none());
    }
}
