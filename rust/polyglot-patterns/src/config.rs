//! Generator configuration.

use polyglot_grammar::RoleValue;
use serde::{Deserialize, Serialize};

/// Knobs for pattern generation. Every field has a default, so a config can
/// be decoded from partial JSON such as `{ "basePriority": 200 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Priority of the full pattern. Every other variant is offset from it.
    pub base_priority: i32,
    /// How far below the full pattern the required-roles-only form sits.
    pub simple_offset: i32,
    /// Whether to generate event-handler variants for languages that define
    /// event-handler syntax.
    pub event_handlers: bool,
    /// Patient value for event-handler forms that omit the patient.
    pub implicit_patient: RoleValue,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            base_priority: 100,
            simple_offset: 5,
            event_handlers: true,
            implicit_patient: RoleValue::reference("me"),
        }
    }
}
