//! Command-verb translations.

use serde::{Deserialize, Serialize};

/// The grammatical form a keyword translation is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordForm {
    Imperative,
    Infinitive,
    Base,
    Polite,
}

/// A command verb as spelled in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordTranslation {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<KeywordForm>,
}

impl KeywordTranslation {
    pub fn new(primary: impl Into<String>) -> Self {
        KeywordTranslation {
            primary: primary.into(),
            alternatives: Vec::new(),
            form: None,
        }
    }

    pub fn with_alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }

    pub fn with_form(mut self, form: KeywordForm) -> Self {
        self.form = Some(form);
        self
    }

    /// The primary spelling followed by every alternative.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.alternatives.iter().map(String::as_str))
    }
}
