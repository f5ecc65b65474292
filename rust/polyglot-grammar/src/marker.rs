//! Role markers and their resolution.
//!
//! A role marker is the particle, preposition or postposition a language uses
//! to signal which role a value fills: English "into" before a destination,
//! Japanese "を" after a patient. Each language profile carries a default
//! marker per role; a command may override it per language.
//!
//! Overrides are tri-state. A command either has no override for a language
//! (the profile default applies), overrides the marker with another string,
//! or suppresses the marker entirely. Suppression is spelled as an empty
//! string in language data, and it must never be confused with "no override".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::LanguageProfile;
use crate::schema::RoleSpec;

/// Which side of the role value a marker sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPosition {
    /// Preposition: the marker precedes the value.
    #[default]
    Before,
    /// Postposition: the marker follows the value.
    After,
}

/// How a role is signaled in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMarker {
    /// The canonical marker. An empty string means "no surface marker".
    pub primary: String,
    /// Other spellings accepted in place of `primary`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub position: MarkerPosition,
}

impl RoleMarker {
    pub fn before(primary: impl Into<String>) -> Self {
        RoleMarker {
            primary: primary.into(),
            alternatives: Vec::new(),
            position: MarkerPosition::Before,
        }
    }

    pub fn after(primary: impl Into<String>) -> Self {
        RoleMarker {
            primary: primary.into(),
            alternatives: Vec::new(),
            position: MarkerPosition::After,
        }
    }

    pub fn with_alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }

    /// True when the marker has no surface form.
    pub fn is_silent(&self) -> bool {
        self.primary.is_empty()
    }

    /// For a multi-word marker, the whitespace-free alternative that spells
    /// the same marker as a single fused token, if one is declared.
    pub fn compact_form(&self) -> Option<&str> {
        if !self.primary.contains(char::is_whitespace) {
            return None;
        }
        let fused: String = self.primary.split_whitespace().collect();
        self.alternatives
            .iter()
            .map(String::as_str)
            .find(|alt| *alt == fused)
    }
}

/// A command-specific marker override for one language.
///
/// Serialized as a plain string: `""` suppresses the marker, anything else
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarkerOverride {
    /// The role appears with no marker at all.
    Suppress,
    /// The role is marked with this string instead of the language default.
    Marker(String),
}

impl From<String> for MarkerOverride {
    fn from(value: String) -> Self {
        if value.is_empty() {
            MarkerOverride::Suppress
        } else {
            MarkerOverride::Marker(value)
        }
    }
}

impl From<MarkerOverride> for String {
    fn from(value: MarkerOverride) -> Self {
        match value {
            MarkerOverride::Suppress => String::new(),
            MarkerOverride::Marker(marker) => marker,
        }
    }
}

impl fmt::Display for MarkerOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerOverride::Suppress => write!(f, "(suppressed)"),
            MarkerOverride::Marker(marker) => write!(f, "{marker}"),
        }
    }
}

/// The marker that applies to one role of one command in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMarker {
    /// Empty when an override suppresses the marker.
    pub primary: String,
    pub alternatives: Vec<String>,
    pub position: MarkerPosition,
    /// Whether the marker came from a command-specific override.
    pub is_override: bool,
}

impl ResolvedMarker {
    /// True when the role is to be emitted without any marker token.
    pub fn is_silent(&self) -> bool {
        self.primary.is_empty()
    }
}

/// Resolve which marker applies to `spec` in `language`.
///
/// 1. An override for `language`, even an empty one, wins. Its position is
///    borrowed from the profile's default marker for the role, or `Before`
///    when the profile has none.
/// 2. Otherwise the profile's default marker, if it has a non-empty primary.
/// 3. Otherwise there is no marker.
pub fn resolve_marker(
    spec: &RoleSpec,
    language: &str,
    profile: &LanguageProfile,
) -> Option<ResolvedMarker> {
    let default = profile.role_markers.get(&spec.role);

    if let Some(marker_override) = spec.marker_override.get(language) {
        let primary = match marker_override {
            MarkerOverride::Suppress => String::new(),
            MarkerOverride::Marker(marker) => marker.clone(),
        };
        return Some(ResolvedMarker {
            primary,
            alternatives: Vec::new(),
            position: default.map(|marker| marker.position).unwrap_or_default(),
            is_override: true,
        });
    }

    default
        .filter(|marker| !marker.is_silent())
        .map(|marker| ResolvedMarker {
            primary: marker.primary.clone(),
            alternatives: marker.alternatives.clone(),
            position: marker.position,
            is_override: false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{LanguageProfile, WordOrder};
    use crate::role::SemanticRole;
    use pretty_assertions::assert_eq;

    fn korean() -> LanguageProfile {
        LanguageProfile::builder("ko", WordOrder::Sov)
            .role_marker(SemanticRole::Patient, RoleMarker::after("를").with_alternative("을"))
            .role_marker(SemanticRole::Destination, RoleMarker::after("에"))
            .build()
    }

    #[test]
    fn language_default_applies_without_override() {
        let spec = RoleSpec::required(SemanticRole::Patient);
        let resolved = resolve_marker(&spec, "ko", &korean()).unwrap();

        assert_eq!(
            resolved,
            ResolvedMarker {
                primary: "를".into(),
                alternatives: vec!["을".into()],
                position: MarkerPosition::After,
                is_override: false,
            }
        );
    }

    #[test]
    fn override_replaces_default_but_keeps_its_position() {
        let spec = RoleSpec::required(SemanticRole::Patient).marker_override("ko", "로");
        let resolved = resolve_marker(&spec, "ko", &korean()).unwrap();

        assert_eq!(resolved.primary, "로");
        assert!(resolved.alternatives.is_empty());
        assert_eq!(resolved.position, MarkerPosition::After);
        assert!(resolved.is_override);
    }

    #[test]
    fn empty_override_suppresses_marker() {
        let spec = RoleSpec::required(SemanticRole::Patient).marker_override("ko", "");
        let resolved = resolve_marker(&spec, "ko", &korean()).unwrap();

        assert!(resolved.is_silent());
        assert!(resolved.is_override);
    }

    #[test]
    fn override_for_another_language_is_ignored() {
        let spec = RoleSpec::required(SemanticRole::Patient).marker_override("ja", "");
        let resolved = resolve_marker(&spec, "ko", &korean()).unwrap();

        assert_eq!(resolved.primary, "를");
        assert!(!resolved.is_override);
    }

    #[test]
    fn override_without_profile_default_is_placed_before() {
        let spec = RoleSpec::optional(SemanticRole::Style).marker_override("ko", "로");
        let resolved = resolve_marker(&spec, "ko", &korean()).unwrap();

        assert_eq!(resolved.position, MarkerPosition::Before);
    }

    #[test]
    fn role_without_marker_resolves_to_none() {
        let spec = RoleSpec::optional(SemanticRole::Source);
        assert_eq!(resolve_marker(&spec, "ko", &korean()), None);
    }

    #[test]
    fn override_deserializes_tri_state() {
        let suppressed: MarkerOverride = serde_json::from_str("\"\"").unwrap();
        let replaced: MarkerOverride = serde_json::from_str("\"로\"").unwrap();

        assert_eq!(suppressed, MarkerOverride::Suppress);
        assert_eq!(replaced, MarkerOverride::Marker("로".into()));
    }

    #[test]
    fn compact_form_requires_multi_word_primary() {
        let fused = RoleMarker::after("할 때").with_alternative("때").with_alternative("할때");
        let single = RoleMarker::after("で").with_alternative("に");

        assert_eq!(fused.compact_form(), Some("할때"));
        assert_eq!(single.compact_form(), None);
    }
}
