//! Semantic roles for command arguments.
//!
//! Roles abstract away language-specific syntax (adpositions, particles, word
//! order) into universal categories. A command declares which roles it binds;
//! each language declares how a role is signaled on the surface. The mapping
//! from surface markers to roles lives in the language profile, so adding a
//! language never touches command definitions.
//!
//! ```text
//! en:  put "hi" into #out        patient="hi"  destination=#out
//! ja:  "hi" を #out に 置く       patient="hi"  destination=#out
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

/// A named argument slot a command can bind.
///
/// The set is closed: language data refers to roles by their lowercase name
/// and unknown names are rejected when the data is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticRole {
    /// The thing acted upon. In "toggle .active", `.active` is the patient.
    Patient,

    /// Where the result goes. In "put 'x' into #out", `#out` is the destination.
    Destination,

    /// Where something comes from. In "remove .active from #menu", `#menu`.
    Source,

    /// The event an event handler listens for ("on click").
    Event,

    /// A guard expression ("if", "unless").
    Condition,

    /// An amount ("increment x by 2").
    Quantity,

    /// A length of time ("wait 2s").
    Duration,

    /// How an operation is carried out ("fetch /url as json" → method).
    Method,

    /// A presentation style ("show #modal with fade").
    Style,

    /// A qualitative manner modifier.
    Manner,

    /// A target state or goal ("transition to opacity 0").
    Goal,

    /// A tool or means ("with editor").
    Instrument,

    /// Who performs the action, when stated explicitly.
    Agent,
}

impl SemanticRole {
    /// Every role, in declaration order.
    pub const ALL: [SemanticRole; 13] = [
        Self::Patient,
        Self::Destination,
        Self::Source,
        Self::Event,
        Self::Condition,
        Self::Quantity,
        Self::Duration,
        Self::Method,
        Self::Style,
        Self::Manner,
        Self::Goal,
        Self::Instrument,
        Self::Agent,
    ];

    /// The lowercase name used in language data and pattern format strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Destination => "destination",
            Self::Source => "source",
            Self::Event => "event",
            Self::Condition => "condition",
            Self::Quantity => "quantity",
            Self::Duration => "duration",
            Self::Method => "method",
            Self::Style => "style",
            Self::Manner => "manner",
            Self::Goal => "goal",
            Self::Instrument => "instrument",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SemanticRole {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| GrammarError::UnknownRole(s.to_string()))
    }
}
