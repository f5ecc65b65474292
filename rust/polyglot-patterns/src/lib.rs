//! # Polyglot Patterns: generated command patterns and matching
//!
//! Turns the declarative grammar data of `polyglot-grammar` into concrete,
//! prioritized token templates for every (command, language) pair, and
//! matches tokenized input against them to recover a language-neutral
//! command.
//!
//! ## Architecture
//!
//! ```text
//! GrammarCatalog ─→ PatternGenerator ─→ PatternCorpus (sorted, per language)
//!                                             │
//! tokens ─────────────────────────────→ match_tokens ─→ CanonicalCommand
//!                                                     └→ NoMatch
//! ```
//!
//! ## Example
//!
//! ```ignore
//! let catalog = polyglot_grammar::helpers::sample_catalog()?;
//! let corpus = PatternCorpus::builder(&catalog).build()?;
//!
//! let command = corpus.match_tokens(&tokenize(".active 를 토글"), "ko")?;
//! assert_eq!(command.action, "toggle");
//! ```

pub mod builder;
pub mod command;
pub mod config;
pub mod corpus;
pub mod error;
pub mod generator;
pub mod input;
pub mod matcher;
pub mod pattern;
pub mod recipe;
pub mod token;

pub use command::{CanonicalCommand, NoMatch};
pub use config::GeneratorConfig;
pub use corpus::{CorpusBuilder, PatternCorpus};
pub use error::GenerateError;
pub use generator::PatternGenerator;
pub use input::{Token, tokenize};
pub use matcher::{match_patterns, match_tokens};
pub use pattern::{ExtractionRule, LanguagePattern, PatternVariant};
pub use token::PatternToken;
