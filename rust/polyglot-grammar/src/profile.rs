//! Language profiles: one language's grammar as data.
//!
//! A profile fixes the language's word order, translates command verbs,
//! and says how each semantic role is marked. Optionally it also describes
//! event-handler syntax ("on click ...", "クリック で ..."), conjunction
//! prefixes used for chained events, and how literals are normalized before
//! comparison.
//!
//! Profiles are loaded once and never mutated. In particular the word order
//! of a registered profile cannot change: the catalog refuses a second
//! profile under the same code.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;
use crate::keyword::KeywordTranslation;
use crate::marker::RoleMarker;
use crate::normalize::Normalization;
use crate::role::SemanticRole;

/// The canonical ordering of subject, object and verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordOrder {
    #[serde(rename = "SVO")]
    Svo,
    #[serde(rename = "SOV")]
    Sov,
    #[serde(rename = "VSO")]
    Vso,
}

impl WordOrder {
    /// Whether the verb closes the clause (SOV) rather than opening it.
    pub fn is_verb_final(&self) -> bool {
        matches!(self, WordOrder::Sov)
    }
}

impl fmt::Display for WordOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordOrder::Svo => write!(f, "SVO"),
            WordOrder::Sov => write!(f, "SOV"),
            WordOrder::Vso => write!(f, "VSO"),
        }
    }
}

impl FromStr for WordOrder {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SVO" => Ok(WordOrder::Svo),
            "SOV" => Ok(WordOrder::Sov),
            "VSO" => Ok(WordOrder::Vso),
            _ => Err(GrammarError::UnknownWordOrder(s.to_string())),
        }
    }
}

/// How a language introduces event handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHandlerSyntax {
    /// Marks the event role: "on" before it, "で" after it.
    pub event_marker: RoleMarker,
    /// Negates the event ("عند عدم التركيز" → when not focused).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negation_marker: Option<RoleMarker>,
    /// Temporal particles ("時", "とき") used in "when X happens" clauses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temporal_markers: Vec<String>,
    /// Optional possessive linking an event to a temporal particle ("の").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possessive_marker: Option<String>,
}

impl EventHandlerSyntax {
    pub fn new(event_marker: RoleMarker) -> Self {
        EventHandlerSyntax {
            event_marker,
            negation_marker: None,
            temporal_markers: Vec::new(),
            possessive_marker: None,
        }
    }

    pub fn with_negation(mut self, marker: RoleMarker) -> Self {
        self.negation_marker = Some(marker);
        self
    }

    pub fn with_temporal_marker(mut self, marker: impl Into<String>) -> Self {
        self.temporal_markers.push(marker.into());
        self
    }

    pub fn with_possessive(mut self, marker: impl Into<String>) -> Self {
        self.possessive_marker = Some(marker.into());
        self
    }
}

/// Hints about how the language's text is split into tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizationHints {
    /// Conjunction proclitics the tokenizer splits off the following word
    /// ("و" and, "ف" then).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,
}

/// One language's grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    pub code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub word_order: WordOrder,
    #[serde(default)]
    pub keywords: BTreeMap<String, KeywordTranslation>,
    #[serde(default)]
    pub role_markers: BTreeMap<SemanticRole, RoleMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_handler: Option<EventHandlerSyntax>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenization: Option<TokenizationHints>,
    #[serde(default)]
    pub normalization: Normalization,
}

impl LanguageProfile {
    pub fn builder(code: impl Into<String>, word_order: WordOrder) -> LanguageProfileBuilder {
        LanguageProfileBuilder::new(code, word_order)
    }

    /// Decode a single profile from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let profile: LanguageProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn keyword(&self, action: &str) -> Option<&KeywordTranslation> {
        self.keywords.get(action)
    }

    pub fn role_marker(&self, role: SemanticRole) -> Option<&RoleMarker> {
        self.role_markers.get(&role)
    }

    /// Conjunction proclitics, empty when the language declares none.
    pub fn prefixes(&self) -> &[String] {
        self.tokenization
            .as_ref()
            .map(|hints| hints.prefixes.as_slice())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.code.is_empty() {
            return Err(GrammarError::EmptyLanguageCode);
        }
        for (action, keyword) in &self.keywords {
            if keyword.primary.trim().is_empty() {
                return Err(GrammarError::EmptyKeyword {
                    language: self.code.clone(),
                    action: action.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Builder for language profiles.
pub struct LanguageProfileBuilder {
    profile: LanguageProfile,
}

impl LanguageProfileBuilder {
    pub fn new(code: impl Into<String>, word_order: WordOrder) -> Self {
        LanguageProfileBuilder {
            profile: LanguageProfile {
                code: code.into(),
                name: String::new(),
                word_order,
                keywords: BTreeMap::new(),
                role_markers: BTreeMap::new(),
                event_handler: None,
                tokenization: None,
                normalization: Normalization::default(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.profile.name = name.into();
        self
    }

    pub fn keyword(mut self, action: impl Into<String>, translation: KeywordTranslation) -> Self {
        self.profile.keywords.insert(action.into(), translation);
        self
    }

    pub fn role_marker(mut self, role: SemanticRole, marker: RoleMarker) -> Self {
        self.profile.role_markers.insert(role, marker);
        self
    }

    pub fn event_handler(mut self, syntax: EventHandlerSyntax) -> Self {
        self.profile.event_handler = Some(syntax);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.profile
            .tokenization
            .get_or_insert_with(TokenizationHints::default)
            .prefixes
            .push(prefix.into());
        self
    }

    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.profile.normalization = normalization;
        self
    }

    pub fn build(self) -> LanguageProfile {
        self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerPosition;
    use pretty_assertions::assert_eq;

    #[test]
    fn word_order_parses_case_insensitively() {
        assert_eq!("sov".parse::<WordOrder>().unwrap(), WordOrder::Sov);
        assert_eq!("VSO".parse::<WordOrder>().unwrap(), WordOrder::Vso);
        assert!(matches!(
            "OSV".parse::<WordOrder>(),
            Err(GrammarError::UnknownWordOrder(_))
        ));
    }

    #[test]
    fn profile_decodes_from_json() {
        let profile = LanguageProfile::from_json(
            r#"{
                "code": "ja",
                "wordOrder": "SOV",
                "keywords": { "toggle": { "primary": "切り替え", "alternatives": ["トグル"] } },
                "roleMarkers": {
                    "patient": { "primary": "を", "position": "after" },
                    "destination": { "primary": "に", "position": "after" }
                },
                "eventHandler": {
                    "eventMarker": { "primary": "で", "position": "after" },
                    "temporalMarkers": ["時", "とき"],
                    "possessiveMarker": "の"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(profile.word_order, WordOrder::Sov);
        assert_eq!(
            profile.keyword("toggle").map(|k| k.spellings().collect::<Vec<_>>()),
            Some(vec!["切り替え", "トグル"])
        );
        assert_eq!(
            profile.role_marker(SemanticRole::Patient).map(|m| m.position),
            Some(MarkerPosition::After)
        );
        let events = profile.event_handler.as_ref().unwrap();
        assert_eq!(events.temporal_markers, vec!["時", "とき"]);
        assert!(profile.prefixes().is_empty());
        assert_eq!(profile.normalization, Normalization::Exact);
    }

    #[test]
    fn empty_keyword_is_rejected() {
        let result = LanguageProfile::from_json(
            r#"{ "code": "en", "wordOrder": "SVO", "keywords": { "toggle": { "primary": " " } } }"#,
        );
        assert!(matches!(result, Err(GrammarError::EmptyKeyword { action, .. }) if action == "toggle"));
    }

    #[test]
    fn builder_collects_prefixes() {
        let profile = LanguageProfile::builder("ar", WordOrder::Vso)
            .prefix("و")
            .prefix("ف")
            .build();
        assert_eq!(profile.prefixes().to_vec(), vec!["و".to_string(), "ف".to_string()]);
    }
}
