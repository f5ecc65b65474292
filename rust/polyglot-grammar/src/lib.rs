//! # Polyglot Grammar: language profiles and command schemas
//!
//! Declarative data describing one abstract command vocabulary and the many
//! languages it can be written in.
//!
//! ## Core Ideas
//!
//! - **Commands are role schemas**: a command is an action name plus the
//!   semantic roles it binds (patient, destination, event, ...). Nothing in a
//!   schema is language-specific except optional per-language marker overrides.
//! - **Languages are grammars as data**: a profile fixes word order (SVO, SOV,
//!   VSO), translates command verbs, and says which particle or adposition
//!   marks each role, before or after its value.
//! - **Resolution is pure**: ordering roles for a word order and resolving the
//!   marker for a role are pure functions over this data, shared by the pattern
//!   generator and anything else that needs to reason about surface syntax.
//!
//! ## Architecture
//!
//! ```text
//! JSON / builders → GrammarCatalog (profiles + schemas, validated)
//!   → order_roles + resolve_marker → pattern generation (polyglot-patterns)
//! ```

pub mod catalog;
pub mod error;
pub mod keyword;
pub mod marker;
pub mod normalize;
pub mod order;
pub mod profile;
pub mod role;
pub mod schema;
pub mod value;

#[cfg(any(test, feature = "helpers"))]
pub mod helpers;

pub use catalog::GrammarCatalog;
pub use error::GrammarError;
pub use keyword::{KeywordForm, KeywordTranslation};
pub use marker::{MarkerOverride, MarkerPosition, ResolvedMarker, RoleMarker, resolve_marker};
pub use normalize::{Normalization, Normalizer};
pub use order::order_roles;
pub use profile::{EventHandlerSyntax, LanguageProfile, TokenizationHints, WordOrder};
pub use role::SemanticRole;
pub use schema::{CommandSchema, CommandSchemaBuilder, RoleSpec};
pub use value::{RoleValue, ValueKind};
