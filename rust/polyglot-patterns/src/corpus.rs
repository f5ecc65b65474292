//! The pattern corpus.
//!
//! A corpus holds every generated pattern, grouped by language and sorted
//! for matching. It is built once from a [`GrammarCatalog`] and is read-only
//! afterwards, so a single instance can be shared across threads behind an
//! `Arc`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use polyglot_grammar::{GrammarCatalog, Normalization, Normalizer};

use crate::command::{CanonicalCommand, NoMatch};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::generator::PatternGenerator;
use crate::input::Token;
use crate::matcher;
use crate::pattern::LanguagePattern;

#[derive(Debug)]
struct LanguageEntry {
    /// Sorted by descending priority, then id.
    patterns: Vec<LanguagePattern>,
    normalizer: Arc<dyn Normalizer>,
}

/// All generated patterns, per language, ready to match against.
#[derive(Debug, Default)]
pub struct PatternCorpus {
    languages: BTreeMap<String, LanguageEntry>,
}

static EXACT: Normalization = Normalization::Exact;

impl PatternCorpus {
    pub fn builder(catalog: &GrammarCatalog) -> CorpusBuilder<'_> {
        CorpusBuilder::new(catalog)
    }

    /// The patterns for `language`, in matching order. Empty for an unknown
    /// language.
    pub fn patterns(&self, language: &str) -> &[LanguagePattern] {
        self.languages
            .get(language)
            .map(|entry| entry.patterns.as_slice())
            .unwrap_or_default()
    }

    /// Look a pattern up by id.
    pub fn pattern(&self, id: &str) -> Option<&LanguagePattern> {
        self.languages
            .values()
            .flat_map(|entry| entry.patterns.iter())
            .find(|pattern| pattern.id == id)
    }

    /// The normalizer literals of `language` were generated with.
    pub fn normalizer(&self, language: &str) -> &dyn Normalizer {
        match self.languages.get(language) {
            Some(entry) => entry.normalizer.as_ref(),
            None => &EXACT,
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Total number of patterns across all languages.
    pub fn len(&self) -> usize {
        self.languages.values().map(|entry| entry.patterns.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Match `tokens` as input in `language`.
    pub fn match_tokens(
        &self,
        tokens: &[Token],
        language: &str,
    ) -> Result<CanonicalCommand, NoMatch> {
        matcher::match_tokens(tokens, language, self)
    }
}

/// Builds a [`PatternCorpus`] from a catalog.
///
/// ```ignore
/// let corpus = PatternCorpus::builder(&catalog)
///     .config(GeneratorConfig::default())
///     .build()?;
/// ```
pub struct CorpusBuilder<'a> {
    catalog: &'a GrammarCatalog,
    config: GeneratorConfig,
    normalizers: BTreeMap<String, Arc<dyn Normalizer>>,
    extra: Vec<LanguagePattern>,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(catalog: &'a GrammarCatalog) -> Self {
        CorpusBuilder {
            catalog,
            config: GeneratorConfig::default(),
            normalizers: BTreeMap::new(),
            extra: Vec::new(),
        }
    }

    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `normalizer` for `language` instead of the profile's own
    /// normalization.
    pub fn normalizer(
        mut self,
        language: impl Into<String>,
        normalizer: impl Normalizer + 'static,
    ) -> Self {
        self.normalizers
            .insert(language.into(), Arc::new(normalizer));
        self
    }

    /// Add a hand-written pattern alongside the generated ones.
    pub fn pattern(mut self, pattern: LanguagePattern) -> Self {
        self.extra.push(pattern);
        self
    }

    /// Build the corpus. Any configuration error aborts the build.
    pub fn build(self) -> Result<PatternCorpus, GenerateError> {
        let (corpus, mut errors) = self.assemble();
        if errors.is_empty() {
            Ok(corpus)
        } else {
            for error in &errors {
                tracing::error!(%error, "pattern generation failed");
            }
            Err(errors.remove(0))
        }
    }

    /// Build the corpus, leaving out whatever failed and returning the errors
    /// alongside it.
    pub fn build_lenient(self) -> (PatternCorpus, Vec<GenerateError>) {
        let (corpus, errors) = self.assemble();
        for error in &errors {
            tracing::warn!(%error, "skipping patterns that failed to generate");
        }
        (corpus, errors)
    }

    fn assemble(self) -> (PatternCorpus, Vec<GenerateError>) {
        let generator = PatternGenerator::new(self.config.clone());
        let mut errors = Vec::new();
        let mut by_language: BTreeMap<String, Vec<LanguagePattern>> = BTreeMap::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        let mut admit = |pattern: LanguagePattern, errors: &mut Vec<GenerateError>| {
            if seen.insert(pattern.id.clone()) {
                by_language
                    .entry(pattern.language.clone())
                    .or_default()
                    .push(pattern);
            } else {
                errors.push(GenerateError::DuplicatePatternId { id: pattern.id });
            }
        };

        for schema in self.catalog.schemas() {
            if let Err(error) =
                schema.validate_override_languages(|code| self.catalog.profile(code).is_some())
            {
                errors.push(error.into());
                continue;
            }

            for profile in self.catalog.profiles() {
                let result = match self.normalizers.get(&profile.code) {
                    Some(normalizer) => {
                        generator.generate_with(schema, profile, normalizer.as_ref())
                    }
                    None => generator.generate(schema, profile),
                };
                match result {
                    Ok(patterns) => {
                        for pattern in patterns {
                            admit(pattern, &mut errors);
                        }
                    }
                    Err(error) => errors.push(error),
                }
            }
        }

        for pattern in self.extra {
            admit(pattern, &mut errors);
        }

        let mut languages = BTreeMap::new();
        for (code, mut patterns) in by_language {
            patterns.sort_by(|left, right| {
                right
                    .priority
                    .cmp(&left.priority)
                    .then_with(|| left.id.cmp(&right.id))
            });
            let normalizer: Arc<dyn Normalizer> = match self.normalizers.get(&code) {
                Some(normalizer) => Arc::clone(normalizer),
                None => match self.catalog.profile(&code) {
                    Some(profile) => Arc::new(profile.normalization),
                    None => Arc::new(Normalization::Exact),
                },
            };
            tracing::debug!(language = %code, patterns = patterns.len(), "indexed language");
            languages.insert(
                code,
                LanguageEntry {
                    patterns,
                    normalizer,
                },
            );
        }

        (PatternCorpus { languages }, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_grammar::helpers::sample_catalog;
    use polyglot_grammar::{CommandSchema, RoleSpec, SemanticRole};

    #[test]
    fn corpus_is_sorted_per_language() {
        let catalog = sample_catalog().unwrap();
        let corpus = PatternCorpus::builder(&catalog).build().unwrap();

        assert_eq!(corpus.languages().count(), 5);
        for language in corpus.languages() {
            let patterns = corpus.patterns(language);
            assert!(!patterns.is_empty());
            assert!(patterns.windows(2).all(|pair| {
                (pair[0].priority, &pair[1].id) >= (pair[1].priority, &pair[0].id)
            }));
        }
    }

    #[test]
    fn ids_are_unique_across_the_corpus() {
        let catalog = sample_catalog().unwrap();
        let corpus = PatternCorpus::builder(&catalog).build().unwrap();

        let ids: BTreeSet<&str> = corpus
            .languages()
            .flat_map(|language| corpus.patterns(language))
            .map(|pattern| pattern.id.as_str())
            .collect();
        assert_eq!(ids.len(), corpus.len());
        assert!(corpus.pattern("toggle-ko-event-first").is_some());
    }

    #[test]
    fn duplicate_extra_pattern_is_fatal() {
        let catalog = sample_catalog().unwrap();
        let corpus = PatternCorpus::builder(&catalog).build().unwrap();
        let duplicate = corpus.pattern("toggle-en-full").cloned().unwrap();

        let result = PatternCorpus::builder(&catalog).pattern(duplicate).build();
        assert!(matches!(
            result,
            Err(GenerateError::DuplicatePatternId { id }) if id == "toggle-en-full"
        ));
    }

    #[test]
    fn lenient_build_skips_failures() {
        let mut catalog = sample_catalog().unwrap();
        catalog
            .register_schema(
                CommandSchema::builder("send")
                    .role(RoleSpec::required(SemanticRole::Patient))
                    .role(RoleSpec::required(SemanticRole::Source).marker_override("xx", "de"))
                    .build(),
            )
            .unwrap();

        let (corpus, errors) = PatternCorpus::builder(&catalog).build_lenient();
        assert_eq!(errors.len(), 1);
        assert!(corpus.pattern("toggle-en-full").is_some());
        assert!(corpus.languages().all(|language| {
            corpus
                .patterns(language)
                .iter()
                .all(|pattern| pattern.command != "send")
        }));
    }

    #[test]
    fn unknown_language_has_no_patterns() {
        let corpus = PatternCorpus::default();
        assert!(corpus.patterns("xx").is_empty());
        assert!(corpus.is_empty());
    }
}
