//! Pattern tokens, the units of a surface-syntax template.
//!
//! A generated pattern is a sequence of tokens of three kinds:
//!
//! - **Literal**: a keyword or marker that must appear verbatim (after
//!   normalization), in its primary spelling or one of its alternatives. A
//!   spelling of several words spans as many input tokens.
//! - **Role**: a slot that binds exactly one input token to a semantic role.
//! - **Group**: a nested sequence matched as a whole. An optional group
//!   matches either all of its tokens or none of them, never a prefix.
//!
//! ```text
//! toggle {patient} [on {destination}]
//! └─lit─┘ └─role──┘ └────group────────┘
//! ```

use std::fmt;

use polyglot_grammar::{SemanticRole, ValueKind};
use serde::{Deserialize, Serialize};

/// One unit of a surface-syntax template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PatternToken {
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alternatives: Vec<String>,
    },
    Role {
        role: SemanticRole,
        optional: bool,
        #[serde(default, rename = "expectedTypes", skip_serializing_if = "Vec::is_empty")]
        expected_types: Vec<ValueKind>,
    },
    Group {
        optional: bool,
        tokens: Vec<PatternToken>,
    },
}

impl PatternToken {
    pub fn literal(value: impl Into<String>) -> Self {
        PatternToken::Literal {
            value: value.into(),
            alternatives: Vec::new(),
        }
    }

    pub fn literal_with(value: impl Into<String>, alternatives: Vec<String>) -> Self {
        PatternToken::Literal {
            value: value.into(),
            alternatives,
        }
    }

    pub fn role(role: SemanticRole) -> Self {
        PatternToken::Role {
            role,
            optional: false,
            expected_types: Vec::new(),
        }
    }

    pub fn optional_group(tokens: Vec<PatternToken>) -> Self {
        PatternToken::Group {
            optional: true,
            tokens,
        }
    }

    /// Every role this token binds, including roles nested in groups.
    pub fn roles(&self) -> Vec<SemanticRole> {
        let mut roles = Vec::new();
        self.collect_roles(&mut roles);
        roles
    }

    fn collect_roles(&self, roles: &mut Vec<SemanticRole>) {
        match self {
            PatternToken::Literal { .. } => {}
            PatternToken::Role { role, .. } => roles.push(*role),
            PatternToken::Group { tokens, .. } => {
                for token in tokens {
                    token.collect_roles(roles);
                }
            }
        }
    }
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternToken::Literal {
                value,
                alternatives,
            } => {
                if alternatives.is_empty() {
                    write!(f, "{value}")
                } else {
                    write!(f, "({value}|{})", alternatives.join("|"))
                }
            }
            PatternToken::Role { role, .. } => write!(f, "{{{role}}}"),
            PatternToken::Group { optional, tokens } => {
                let (open, close) = if *optional { ("[", "]") } else { ("(", ")") };
                write!(f, "{open}")?;
                for (index, token) in tokens.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{token}")?;
                }
                write!(f, "{close}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_format_syntax() {
        let tokens = [
            PatternToken::literal("toggle"),
            PatternToken::role(SemanticRole::Patient),
            PatternToken::optional_group(vec![
                PatternToken::literal_with("on", vec!["upon".into()]),
                PatternToken::role(SemanticRole::Destination),
            ]),
        ];
        let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["toggle", "{patient}", "[(on|upon) {destination}]"]);
    }

    #[test]
    fn roles_include_nested_groups() {
        let group = PatternToken::optional_group(vec![
            PatternToken::literal("to"),
            PatternToken::role(SemanticRole::Destination),
        ]);
        assert_eq!(group.roles(), vec![SemanticRole::Destination]);
        assert!(PatternToken::literal("to").roles().is_empty());
    }
}
