//! The grammar catalog: every registered language profile and command schema.
//!
//! The catalog is the in-memory form of the external profile/schema data
//! source. It is filled once at startup (from JSON documents or builders),
//! validated, and then handed to the pattern generator. Nothing in it is
//! mutated afterwards.
//!
//! ```json
//! [
//!   { "code": "en", "wordOrder": "SVO",
//!     "keywords": { "toggle": { "primary": "toggle" } },
//!     "roleMarkers": { "destination": { "primary": "on" } } }
//! ]
//! ```

use std::collections::BTreeMap;

use crate::error::GrammarError;
use crate::profile::LanguageProfile;
use crate::schema::CommandSchema;

/// Registered language profiles and command schemas.
#[derive(Debug, Clone, Default)]
pub struct GrammarCatalog {
    profiles: BTreeMap<String, LanguageProfile>,
    schemas: Vec<CommandSchema>,
}

impl GrammarCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a language profile. A code can be registered only once, which
    /// keeps each language's word order fixed.
    pub fn register_profile(&mut self, profile: LanguageProfile) -> Result<(), GrammarError> {
        profile.validate()?;
        if self.profiles.contains_key(&profile.code) {
            return Err(GrammarError::DuplicateProfile(profile.code));
        }
        tracing::debug!(
            language = %profile.code,
            word_order = %profile.word_order,
            keywords = profile.keywords.len(),
            "registered language profile"
        );
        self.profiles.insert(profile.code.clone(), profile);
        Ok(())
    }

    /// Register a command schema.
    pub fn register_schema(&mut self, schema: CommandSchema) -> Result<(), GrammarError> {
        schema.validate()?;
        if self.schema(&schema.action).is_some() {
            return Err(GrammarError::DuplicateSchema(schema.action));
        }
        tracing::debug!(action = %schema.action, roles = schema.roles.len(), "registered command schema");
        self.schemas.push(schema);
        Ok(())
    }

    /// Register every profile in a JSON array.
    pub fn load_profiles_json(&mut self, json: &str) -> Result<(), GrammarError> {
        let profiles: Vec<LanguageProfile> = serde_json::from_str(json)?;
        for profile in profiles {
            self.register_profile(profile)?;
        }
        Ok(())
    }

    /// Register every command schema in a JSON array.
    pub fn load_schemas_json(&mut self, json: &str) -> Result<(), GrammarError> {
        let schemas: Vec<CommandSchema> = serde_json::from_str(json)?;
        for schema in schemas {
            self.register_schema(schema)?;
        }
        Ok(())
    }

    /// Check cross-references between schemas and profiles: every marker
    /// override must name a registered language.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for schema in &self.schemas {
            schema.validate_override_languages(|language| self.profiles.contains_key(language))?;
        }
        Ok(())
    }

    pub fn profile(&self, code: &str) -> Option<&LanguageProfile> {
        self.profiles.get(code)
    }

    /// Profiles, ordered by language code.
    pub fn profiles(&self) -> impl Iterator<Item = &LanguageProfile> {
        self.profiles.values()
    }

    pub fn schema(&self, action: &str) -> Option<&CommandSchema> {
        self.schemas.iter().find(|schema| schema.action == action)
    }

    /// Schemas, in registration order.
    pub fn schemas(&self) -> &[CommandSchema] {
        &self.schemas
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::WordOrder;
    use crate::role::SemanticRole;
    use crate::schema::RoleSpec;

    #[test]
    fn duplicate_profile_is_rejected() {
        let mut catalog = GrammarCatalog::new();
        catalog
            .register_profile(LanguageProfile::builder("ja", WordOrder::Sov).build())
            .unwrap();

        let result = catalog.register_profile(LanguageProfile::builder("ja", WordOrder::Svo).build());
        assert!(matches!(result, Err(GrammarError::DuplicateProfile(code)) if code == "ja"));
        assert_eq!(catalog.profile("ja").map(|p| p.word_order), Some(WordOrder::Sov));
    }

    #[test]
    fn duplicate_schema_is_rejected() {
        let mut catalog = GrammarCatalog::new();
        catalog
            .register_schema(CommandSchema::builder("toggle").patient().build())
            .unwrap();
        let result = catalog.register_schema(CommandSchema::builder("toggle").build());
        assert!(matches!(result, Err(GrammarError::DuplicateSchema(action)) if action == "toggle"));
    }

    #[test]
    fn validate_catches_overrides_for_unknown_languages() {
        let mut catalog = GrammarCatalog::new();
        catalog
            .register_profile(LanguageProfile::builder("en", WordOrder::Svo).build())
            .unwrap();
        catalog
            .register_schema(
                CommandSchema::builder("toggle")
                    .role(RoleSpec::required(SemanticRole::Patient).marker_override("ko", ""))
                    .build(),
            )
            .unwrap();

        assert!(matches!(
            catalog.validate(),
            Err(GrammarError::UnknownOverrideLanguage { language, .. }) if language == "ko"
        ));

        catalog
            .register_profile(LanguageProfile::builder("ko", WordOrder::Sov).build())
            .unwrap();
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn loads_json_documents() {
        let mut catalog = GrammarCatalog::new();
        catalog
            .load_profiles_json(
                r#"[
                    { "code": "en", "wordOrder": "SVO", "keywords": { "toggle": { "primary": "toggle" } } },
                    { "code": "ko", "wordOrder": "SOV", "keywords": { "toggle": { "primary": "토글" } } }
                ]"#,
            )
            .unwrap();
        catalog
            .load_schemas_json(r#"[{ "action": "toggle", "roles": [{ "role": "patient", "required": true }] }]"#)
            .unwrap();

        assert_eq!(catalog.languages().collect::<Vec<_>>(), vec!["en", "ko"]);
        assert_eq!(catalog.schemas().len(), 1);
    }

    #[test]
    fn malformed_json_surfaces_decode_error() {
        let mut catalog = GrammarCatalog::new();
        let result = catalog.load_profiles_json(r#"[{ "code": "en", "wordOrder": "OVS" }]"#);
        assert!(matches!(result, Err(GrammarError::Json(_))));
    }
}
