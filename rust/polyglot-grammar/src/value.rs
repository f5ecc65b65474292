//! Role values and their shapes.
//!
//! The engine does not interpret role values. It only looks at their shape,
//! which the tokenizer assigns, to honour a role's expected types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The shape of a token or role value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A bare word: keywords, markers, event names, identifiers.
    Word,
    /// A CSS-selector-like value (`.active`, `#menu`, `<button/>`).
    Selector,
    /// A quoted string literal.
    String,
    /// A numeric literal.
    Number,
    /// A number with a time unit (`2s`, `300ms`).
    Duration,
    /// A contextual reference such as the current element.
    Reference,
    /// A nested expression the tokenizer delimited as one span.
    Expression,
}

impl ValueKind {
    /// Whether tokens of this kind can spell a keyword or marker.
    pub fn is_literal_like(&self) -> bool {
        matches!(self, ValueKind::Word | ValueKind::Reference)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Word => "word",
            ValueKind::Selector => "selector",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Duration => "duration",
            ValueKind::Reference => "reference",
            ValueKind::Expression => "expression",
        };
        write!(f, "{name}")
    }
}

/// A value bound to a role, either by the matcher or as a declared default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleValue {
    pub kind: ValueKind,
    pub text: String,
}

impl RoleValue {
    pub fn new(kind: ValueKind, text: impl Into<String>) -> Self {
        RoleValue {
            kind,
            text: text.into(),
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Word, text)
    }

    pub fn selector(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Selector, text)
    }

    pub fn reference(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Reference, text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RoleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
