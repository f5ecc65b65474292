//! Literal normalization.
//!
//! Keywords and markers are compared against input tokens after both sides
//! pass through the same normalizer. Which normalization is right depends on
//! the language (case folding means nothing for Japanese and is wrong for
//! Turkish dotted/dotless i), so it is chosen per profile, and callers can
//! plug in their own.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalization step applied to literal text before comparison.
pub trait Normalizer: fmt::Debug + Send + Sync {
    fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str>;

    /// Whether `left` and `right` are equal once normalized.
    fn equivalent(&self, left: &str, right: &str) -> bool {
        self.normalize(left) == self.normalize(right)
    }
}

/// Built-in normalizations selectable from language data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Compare literals byte for byte.
    #[default]
    Exact,
    /// Compare literals after Unicode lowercasing.
    Lowercase,
}

impl Normalizer for Normalization {
    fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Normalization::Exact => Cow::Borrowed(text),
            Normalization::Lowercase => {
                if text.chars().any(char::is_uppercase) {
                    Cow::Owned(text.to_lowercase())
                } else {
                    Cow::Borrowed(text)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_keeps_case() {
        assert!(!Normalization::Exact.equivalent("Toggle", "toggle"));
        assert!(Normalization::Exact.equivalent("토글", "토글"));
    }

    #[test]
    fn lowercase_folds_case() {
        assert!(Normalization::Lowercase.equivalent("Toggle", "toggle"));
        assert!(matches!(
            Normalization::Lowercase.normalize("toggle"),
            Cow::Borrowed("toggle")
        ));
    }
}
