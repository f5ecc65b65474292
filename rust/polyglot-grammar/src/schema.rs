//! Commands as language-neutral role schemas.
//!
//! A command schema names an action and the roles it binds. It says nothing
//! about how any language spells the command: keyword translations and role
//! markers live in the language profile. The only language-aware part of a
//! schema is the per-language marker override on a role, for commands whose
//! surface syntax departs from the language's usual marking.
//!
//! ```text
//! put  = { patient (required), destination (required) }
//! show = { patient (optional, default: me), style (optional) }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;
use crate::marker::MarkerOverride;
use crate::profile::WordOrder;
use crate::role::SemanticRole;
use crate::value::{RoleValue, ValueKind};

/// One role required or offered by a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpec {
    pub role: SemanticRole,
    #[serde(default)]
    pub required: bool,
    /// Ordering hint for verb-final languages. Unset sorts last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sov_position: Option<u32>,
    /// Ordering hint for verb-initial languages. Unset sorts last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svo_position: Option<u32>,
    /// Per-language marker overrides, keyed by language code. A missing key
    /// means the language default applies.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub marker_override: BTreeMap<String, MarkerOverride>,
    /// Value used when an optional role is omitted from the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<RoleValue>,
    /// Shapes the bound value may take. Empty accepts any shape.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_types: Vec<ValueKind>,
}

impl RoleSpec {
    fn new(role: SemanticRole, required: bool) -> Self {
        RoleSpec {
            role,
            required,
            sov_position: None,
            svo_position: None,
            marker_override: BTreeMap::new(),
            default: None,
            expected_types: Vec::new(),
        }
    }

    pub fn required(role: SemanticRole) -> Self {
        Self::new(role, true)
    }

    pub fn optional(role: SemanticRole) -> Self {
        Self::new(role, false)
    }

    pub fn sov_position(mut self, position: u32) -> Self {
        self.sov_position = Some(position);
        self
    }

    pub fn svo_position(mut self, position: u32) -> Self {
        self.svo_position = Some(position);
        self
    }

    /// Override the role's marker in `language`. An empty marker suppresses it.
    pub fn marker_override(mut self, language: impl Into<String>, marker: impl Into<String>) -> Self {
        self.marker_override
            .insert(language.into(), MarkerOverride::from(marker.into()));
        self
    }

    pub fn default_value(mut self, value: RoleValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn expects(mut self, kind: ValueKind) -> Self {
        self.expected_types.push(kind);
        self
    }

    /// The ordering hint that applies to `order`.
    pub fn position_for(&self, order: WordOrder) -> Option<u32> {
        match order {
            WordOrder::Sov => self.sov_position,
            WordOrder::Svo | WordOrder::Vso => self.svo_position,
        }
    }
}

/// An abstract command: an action identifier and the roles it binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSchema {
    pub action: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub roles: Vec<RoleSpec>,
}

impl CommandSchema {
    pub fn builder(action: impl Into<String>) -> CommandSchemaBuilder {
        CommandSchemaBuilder::new(action)
    }

    /// Get the spec for a given role, if the command binds it.
    pub fn role(&self, role: SemanticRole) -> Option<&RoleSpec> {
        self.roles.iter().find(|spec| spec.role == role)
    }

    pub fn required_roles(&self) -> impl Iterator<Item = &RoleSpec> {
        self.roles.iter().filter(|spec| spec.required)
    }

    pub fn has_optional_roles(&self) -> bool {
        self.roles.iter().any(|spec| !spec.required)
    }

    /// Check the schema on its own: every role may appear only once.
    pub fn validate(&self) -> Result<(), GrammarError> {
        let mut seen = BTreeSet::new();
        for spec in &self.roles {
            if !seen.insert(spec.role) {
                return Err(GrammarError::DuplicateRole {
                    action: self.action.clone(),
                    role: spec.role.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check that every marker override names a language `is_registered`
    /// accepts.
    pub fn validate_override_languages<F>(&self, is_registered: F) -> Result<(), GrammarError>
    where
        F: Fn(&str) -> bool,
    {
        for spec in &self.roles {
            if let Some(language) = spec
                .marker_override
                .keys()
                .find(|language| !is_registered(language))
            {
                return Err(GrammarError::UnknownOverrideLanguage {
                    action: self.action.clone(),
                    role: spec.role.to_string(),
                    language: language.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Builder for constructing command schemas ergonomically.
pub struct CommandSchemaBuilder {
    action: String,
    description: String,
    roles: Vec<RoleSpec>,
}

impl CommandSchemaBuilder {
    pub fn new(action: impl Into<String>) -> Self {
        CommandSchemaBuilder {
            action: action.into(),
            description: String::new(),
            roles: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a role spec.
    pub fn role(mut self, spec: RoleSpec) -> Self {
        self.roles.push(spec);
        self
    }

    /// Shorthand: a required patient, first in every word order.
    pub fn patient(self) -> Self {
        self.role(
            RoleSpec::required(SemanticRole::Patient)
                .svo_position(1)
                .sov_position(1),
        )
    }

    /// Shorthand: a destination after the patient in every word order.
    pub fn destination(self, required: bool) -> Self {
        let spec = if required {
            RoleSpec::required(SemanticRole::Destination)
        } else {
            RoleSpec::optional(SemanticRole::Destination)
        };
        self.role(spec.svo_position(2).sov_position(2))
    }

    pub fn build(self) -> CommandSchema {
        CommandSchema {
            action: self.action,
            description: self.description,
            roles: self.roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn put() -> CommandSchema {
        CommandSchema::builder("put")
            .description("Insert content into an element")
            .patient()
            .destination(true)
            .build()
    }

    #[test]
    fn lookup_role_spec() {
        let schema = put();
        assert_eq!(
            schema.role(SemanticRole::Destination).map(|spec| spec.required),
            Some(true)
        );
        assert!(schema.role(SemanticRole::Style).is_none());
        assert!(!schema.has_optional_roles());
    }

    #[test]
    fn duplicate_roles_are_rejected() {
        let schema = CommandSchema::builder("toggle")
            .patient()
            .role(RoleSpec::optional(SemanticRole::Patient))
            .build();

        assert!(matches!(
            schema.validate(),
            Err(GrammarError::DuplicateRole { action, role }) if action == "toggle" && role == "patient"
        ));
    }

    #[test]
    fn override_for_unregistered_language_is_rejected() {
        let schema = CommandSchema::builder("toggle")
            .role(RoleSpec::required(SemanticRole::Patient).marker_override("xx", ""))
            .build();

        let result = schema.validate_override_languages(|language| language == "en");
        assert!(matches!(
            result,
            Err(GrammarError::UnknownOverrideLanguage { language, .. }) if language == "xx"
        ));
        assert!(schema.validate_override_languages(|_| true).is_ok());
    }

    #[test]
    fn schema_deserializes_from_camel_case_json() {
        let schema: CommandSchema = serde_json::from_str(
            r#"{
                "action": "show",
                "roles": [
                    {
                        "role": "patient",
                        "svoPosition": 1,
                        "default": { "kind": "reference", "text": "me" },
                        "markerOverride": { "ja": "" },
                        "expectedTypes": ["selector", "reference"]
                    }
                ]
            }"#,
        )
        .unwrap();

        let patient = schema.role(SemanticRole::Patient).unwrap();
        assert!(!patient.required);
        assert_eq!(patient.svo_position, Some(1));
        assert_eq!(patient.sov_position, None);
        assert_eq!(patient.default, Some(RoleValue::reference("me")));
        assert_eq!(patient.marker_override.get("ja"), Some(&MarkerOverride::Suppress));
        assert_eq!(
            patient.expected_types,
            vec![ValueKind::Selector, ValueKind::Reference]
        );
    }
}
