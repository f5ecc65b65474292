//! Pattern generation.
//!
//! For one command schema and one language profile the generator produces:
//!
//! - the **full** pattern: every role in word order, optional roles wrapped
//!   in optional groups, the verb first (SVO, VSO) or last (SOV);
//! - the **simple** pattern: required roles only, when the schema has any
//!   optional role;
//! - the **event-handler** variants described by [`crate::recipe`], when the
//!   profile defines event-handler syntax.
//!
//! Every piece of surface syntax comes from the data: verb spellings from the
//! profile's keywords, markers from [`resolve_marker`], role order from
//! [`order_roles`]. Literal text passes through the profile's normalizer (or
//! one supplied by the caller) so the matcher can compare like with like.

use std::collections::{BTreeMap, BTreeSet};

use polyglot_grammar::{
    CommandSchema, EventHandlerSyntax, KeywordTranslation, LanguageProfile, Normalizer,
    ResolvedMarker, RoleSpec, SemanticRole, ValueKind, order_roles, resolve_marker,
};

use crate::builder::{arrange, fused_literal, literal_tokens, mark, optional, role_slot, spec_slot};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::pattern::{ExtractionRule, LanguagePattern, PatternVariant};
use crate::recipe::{EventForm, Pick, Presence, Recipe, Requirement, Slot, recipes_for};
use crate::token::PatternToken;

/// Generates language patterns from command schemas and language profiles.
#[derive(Debug, Clone, Default)]
pub struct PatternGenerator {
    config: GeneratorConfig,
}

impl PatternGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        PatternGenerator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every pattern for `schema` in `profile`'s language, using the
    /// profile's own normalization.
    ///
    /// A command the profile has no keyword for yields no patterns, not an
    /// error.
    pub fn generate(
        &self,
        schema: &CommandSchema,
        profile: &LanguageProfile,
    ) -> Result<Vec<LanguagePattern>, GenerateError> {
        self.generate_with(schema, profile, &profile.normalization)
    }

    /// Like [`generate`](Self::generate), with an explicit normalizer for
    /// literal text.
    pub fn generate_with(
        &self,
        schema: &CommandSchema,
        profile: &LanguageProfile,
        normalizer: &dyn Normalizer,
    ) -> Result<Vec<LanguagePattern>, GenerateError> {
        schema.validate()?;
        profile.validate()?;

        let Some(keyword) = profile.keyword(&schema.action) else {
            tracing::debug!(
                action = %schema.action,
                language = %profile.code,
                "no keyword translation, skipping command"
            );
            return Ok(Vec::new());
        };

        let cx = Context::new(schema, profile, normalizer, keyword);
        cx.check_expressible()?;

        let extraction = cx.extraction();
        let mut patterns = vec![self.full(&cx, &extraction)];
        if schema.has_optional_roles() {
            patterns.push(self.simple(&cx, &extraction));
        }
        if self.config.event_handlers {
            patterns.extend(self.event_variants(&cx, &extraction));
        }

        let mut seen = BTreeSet::new();
        for pattern in &patterns {
            if !seen.insert(pattern.id.as_str()) {
                return Err(GenerateError::DuplicatePatternId {
                    id: pattern.id.clone(),
                });
            }
        }

        tracing::debug!(
            action = %schema.action,
            language = %profile.code,
            count = patterns.len(),
            "generated patterns"
        );
        Ok(patterns)
    }

    fn pattern(
        &self,
        cx: &Context<'_>,
        variant: PatternVariant,
        priority: i32,
        tokens: Vec<PatternToken>,
        extraction: BTreeMap<SemanticRole, ExtractionRule>,
    ) -> LanguagePattern {
        LanguagePattern {
            id: LanguagePattern::pattern_id(&cx.schema.action, &cx.profile.code, variant),
            language: cx.profile.code.clone(),
            command: cx.schema.action.clone(),
            variant,
            priority,
            tokens,
            extraction,
        }
    }

    fn full(
        &self,
        cx: &Context<'_>,
        extraction: &BTreeMap<SemanticRole, ExtractionRule>,
    ) -> LanguagePattern {
        let roles = cx
            .ordered
            .iter()
            .flat_map(|spec| cx.phrase(spec, spec.required))
            .collect();
        let tokens = arrange(cx.profile.word_order, cx.verb.clone(), roles);
        self.pattern(
            cx,
            PatternVariant::Full,
            self.config.base_priority,
            tokens,
            extraction.clone(),
        )
    }

    fn simple(
        &self,
        cx: &Context<'_>,
        extraction: &BTreeMap<SemanticRole, ExtractionRule>,
    ) -> LanguagePattern {
        let roles = cx
            .ordered
            .iter()
            .filter(|spec| spec.required)
            .flat_map(|spec| cx.phrase(spec, true))
            .collect();
        let tokens = arrange(cx.profile.word_order, cx.verb.clone(), roles);
        self.pattern(
            cx,
            PatternVariant::Simple,
            self.config.base_priority - self.config.simple_offset,
            tokens,
            extraction.clone(),
        )
    }

    fn event_variants(
        &self,
        cx: &Context<'_>,
        extraction: &BTreeMap<SemanticRole, ExtractionRule>,
    ) -> Vec<LanguagePattern> {
        let Some(syntax) = cx.profile.event_handler.as_ref() else {
            return Vec::new();
        };
        if cx.schema.role(SemanticRole::Event).is_some() {
            tracing::debug!(
                action = %cx.schema.action,
                "command binds its own event role, skipping event-handler variants"
            );
            return Vec::new();
        }

        recipes_for(cx.profile.word_order)
            .filter_map(|recipe| self.event_variant(cx, syntax, recipe, extraction))
            .collect()
    }

    fn event_variant(
        &self,
        cx: &Context<'_>,
        syntax: &EventHandlerSyntax,
        recipe: &Recipe,
        extraction: &BTreeMap<SemanticRole, ExtractionRule>,
    ) -> Option<LanguagePattern> {
        if let Some(missing) = recipe
            .requires
            .iter()
            .find(|requirement| !cx.meets(**requirement, syntax))
        {
            tracing::trace!(
                action = %cx.schema.action,
                language = %cx.profile.code,
                variant = %recipe.variant,
                requirement = ?missing,
                "variant does not apply"
            );
            return None;
        }

        let implicit = if recipe.implicit_primary {
            cx.primary()
                .filter(|spec| spec.role == SemanticRole::Patient || spec.default.is_some())
        } else {
            None
        };

        let mut tokens = Vec::new();
        let mut covered = BTreeSet::new();
        let mut event_rule = ExtractionRule::default();

        for slot in recipe.slots {
            match *slot {
                Slot::Verb => tokens.extend(cx.verb.iter().cloned()),
                Slot::Event(form) => {
                    let (clause, rule) = cx.event_clause(syntax, form)?;
                    tokens.extend(clause);
                    event_rule = rule;
                }
                Slot::Temporal => {
                    let (clause, rule) = cx.temporal_clause(syntax)?;
                    tokens.extend(clause);
                    event_rule = rule;
                }
                Slot::Conjunction => tokens.extend(cx.conjunction()?),
                Slot::Role(pick, presence) => {
                    let Some(spec) = cx.pick(pick) else {
                        continue;
                    };
                    let required = presence == Presence::Required || spec.required;
                    tokens.extend(cx.phrase(spec, required));
                    covered.insert(spec.role);
                }
            }
        }

        let uncovered = cx.schema.required_roles().find(|spec| {
            !covered.contains(&spec.role) && implicit.is_none_or(|primary| primary.role != spec.role)
        });
        if let Some(spec) = uncovered {
            tracing::debug!(
                action = %cx.schema.action,
                language = %cx.profile.code,
                variant = %recipe.variant,
                role = %spec.role,
                "variant leaves a required role unbound, skipping"
            );
            return None;
        }

        let mut extraction = extraction.clone();
        extraction.insert(SemanticRole::Event, event_rule);
        if let Some(primary) = implicit {
            let default = primary
                .default
                .clone()
                .unwrap_or_else(|| self.config.implicit_patient.clone());
            extraction.entry(primary.role).or_default().default = Some(default);
        }

        Some(self.pattern(
            cx,
            recipe.variant,
            self.config.base_priority + recipe.offset,
            tokens,
            extraction,
        ))
    }
}

/// Everything resolved once per (command, language) pair.
struct Context<'a> {
    schema: &'a CommandSchema,
    profile: &'a LanguageProfile,
    normalizer: &'a dyn Normalizer,
    ordered: Vec<&'a RoleSpec>,
    markers: BTreeMap<SemanticRole, ResolvedMarker>,
    verb: Vec<PatternToken>,
}

impl<'a> Context<'a> {
    fn new(
        schema: &'a CommandSchema,
        profile: &'a LanguageProfile,
        normalizer: &'a dyn Normalizer,
        keyword: &KeywordTranslation,
    ) -> Self {
        let markers = schema
            .roles
            .iter()
            .filter_map(|spec| {
                resolve_marker(spec, &profile.code, profile).map(|marker| (spec.role, marker))
            })
            .collect();

        Context {
            schema,
            profile,
            normalizer,
            ordered: order_roles(&schema.roles, profile.word_order),
            markers,
            verb: literal_tokens(&keyword.primary, &keyword.alternatives, normalizer),
        }
    }

    /// The marker a role is spelled with, if it has a surface form.
    fn marker(&self, role: SemanticRole) -> Option<&ResolvedMarker> {
        self.markers.get(&role).filter(|marker| !marker.is_silent())
    }

    /// A role slot with its marker, wrapped in an optional group unless
    /// `required`.
    fn phrase(&self, spec: &RoleSpec, required: bool) -> Vec<PatternToken> {
        let slot = vec![spec_slot(spec, false)];
        let tokens = match self.marker(spec.role) {
            Some(marker) => mark(
                slot,
                literal_tokens(&marker.primary, &marker.alternatives, self.normalizer),
                marker.position,
            ),
            None => slot,
        };
        if required { tokens } else { optional(tokens) }
    }

    /// A required role with no marker and no position hint cannot be placed
    /// among other unmarked roles.
    fn check_expressible(&self) -> Result<(), GenerateError> {
        let unmarked: Vec<&RoleSpec> = self
            .ordered
            .iter()
            .copied()
            .filter(|spec| self.marker(spec.role).is_none())
            .collect();
        if unmarked.len() < 2 {
            return Ok(());
        }

        let word_order = self.profile.word_order;
        match unmarked
            .iter()
            .find(|spec| spec.required && spec.position_for(word_order).is_none())
        {
            Some(spec) => Err(GenerateError::UnexpressibleRole {
                action: self.schema.action.clone(),
                language: self.profile.code.clone(),
                role: spec.role.to_string(),
                word_order: word_order.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Extraction rules for every schema role.
    fn extraction(&self) -> BTreeMap<SemanticRole, ExtractionRule> {
        self.schema
            .roles
            .iter()
            .map(|spec| {
                let marker = self.marker(spec.role);
                let rule = ExtractionRule {
                    marker: marker.map(|marker| marker.primary.clone()),
                    marker_alternatives: marker
                        .map(|marker| marker.alternatives.clone())
                        .unwrap_or_default(),
                    default: if spec.required { None } else { spec.default.clone() },
                };
                (spec.role, rule)
            })
            .collect()
    }

    fn primary(&self) -> Option<&'a RoleSpec> {
        self.schema
            .role(SemanticRole::Patient)
            .or_else(|| self.ordered.first().copied())
    }

    fn secondary(&self) -> Option<&'a RoleSpec> {
        let primary = self.primary().map(|spec| spec.role);
        self.schema
            .role(SemanticRole::Destination)
            .filter(|spec| Some(spec.role) != primary)
    }

    /// The two required roles in word order, when there are exactly two.
    fn required_pair(&self) -> Option<(&'a RoleSpec, &'a RoleSpec)> {
        let required: Vec<&'a RoleSpec> = self
            .ordered
            .iter()
            .copied()
            .filter(|spec| spec.required)
            .collect();
        match required.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    fn pick(&self, pick: Pick) -> Option<&'a RoleSpec> {
        match pick {
            Pick::Primary => self.primary(),
            Pick::Secondary => self.secondary(),
            Pick::First => self.required_pair().map(|(first, _)| first),
            Pick::Second => self.required_pair().map(|(_, second)| second),
            Pick::Lead => self.required_pair().map(|(first, second)| {
                if first.role == SemanticRole::Destination {
                    first
                } else {
                    second
                }
            }),
            Pick::Trail => self.required_pair().map(|(first, second)| {
                if first.role == SemanticRole::Destination {
                    second
                } else {
                    first
                }
            }),
        }
    }

    fn meets(&self, requirement: Requirement, syntax: &EventHandlerSyntax) -> bool {
        match requirement {
            Requirement::HasPrimary => self.primary().is_some(),
            Requirement::HasSecondary => self.secondary().is_some(),
            Requirement::SecondaryOmissible => self.secondary().is_none_or(|spec| !spec.required),
            Requirement::DistinctSecondaryMarker => {
                let event = self.normalizer.normalize(&syntax.event_marker.primary);
                self.secondary()
                    .and_then(|spec| self.marker(spec.role))
                    .is_none_or(|marker| self.normalizer.normalize(&marker.primary) != event)
            }
            Requirement::CompactEventMarker => syntax.event_marker.compact_form().is_some(),
            Requirement::TemporalMarkers => !syntax.temporal_markers.is_empty(),
            Requirement::NegationMarker => syntax
                .negation_marker
                .as_ref()
                .is_some_and(|marker| !marker.is_silent()),
            Requirement::ProcliticPrefixes => !self.profile.prefixes().is_empty(),
            Requirement::TwoRequiredRoles => self.required_pair().is_some(),
        }
    }

    fn event_slot() -> PatternToken {
        role_slot(SemanticRole::Event, false, &[ValueKind::Word])
    }

    /// The event clause and the rule describing its marker.
    fn event_clause(
        &self,
        syntax: &EventHandlerSyntax,
        form: EventForm,
    ) -> Option<(Vec<PatternToken>, ExtractionRule)> {
        let event_marker = &syntax.event_marker;
        let marked = ExtractionRule {
            marker: Some(event_marker.primary.clone()),
            marker_alternatives: event_marker.alternatives.clone(),
            default: None,
        };
        let marker_tokens = || {
            literal_tokens(
                &event_marker.primary,
                &event_marker.alternatives,
                self.normalizer,
            )
        };

        let clause = match form {
            EventForm::Marked => (
                mark(vec![Self::event_slot()], marker_tokens(), event_marker.position),
                marked,
            ),
            EventForm::Compact => {
                let compact = event_marker.compact_form()?;
                let rule = ExtractionRule {
                    marker: Some(compact.to_string()),
                    ..ExtractionRule::default()
                };
                (
                    mark(
                        vec![Self::event_slot()],
                        vec![fused_literal(compact, self.normalizer)],
                        event_marker.position,
                    ),
                    rule,
                )
            }
            EventForm::Negated => {
                let negation = syntax.negation_marker.as_ref()?;
                let negated = mark(
                    vec![Self::event_slot()],
                    literal_tokens(&negation.primary, &negation.alternatives, self.normalizer),
                    negation.position,
                );
                (mark(negated, marker_tokens(), event_marker.position), marked)
            }
            EventForm::Bare => (vec![Self::event_slot()], ExtractionRule::default()),
        };
        Some(clause)
    }

    /// `event [possessive] temporal`, e.g. `{event} [の] (時|とき)`.
    fn temporal_clause(
        &self,
        syntax: &EventHandlerSyntax,
    ) -> Option<(Vec<PatternToken>, ExtractionRule)> {
        let (first, rest) = syntax.temporal_markers.split_first()?;
        let mut tokens = vec![Self::event_slot()];
        if let Some(possessive) = &syntax.possessive_marker {
            tokens.extend(optional(literal_tokens(possessive, &[], self.normalizer)));
        }
        tokens.extend(literal_tokens(first, rest, self.normalizer));

        let rule = ExtractionRule {
            marker: Some(first.clone()),
            marker_alternatives: rest.to_vec(),
            default: None,
        };
        Some((tokens, rule))
    }

    fn conjunction(&self) -> Option<Vec<PatternToken>> {
        let (first, rest) = self.profile.prefixes().split_first()?;
        Some(literal_tokens(first, rest, self.normalizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_grammar::helpers::{self, japanese, korean};
    use polyglot_grammar::{RoleMarker, WordOrder};
    use pretty_assertions::assert_eq;

    fn formats(patterns: &[LanguagePattern]) -> Vec<(String, i32, String)> {
        patterns
            .iter()
            .map(|pattern| (pattern.variant.to_string(), pattern.priority, pattern.format()))
            .collect()
    }

    fn find(patterns: &[LanguagePattern], variant: PatternVariant) -> &LanguagePattern {
        patterns
            .iter()
            .find(|pattern| pattern.variant == variant)
            .unwrap()
    }

    #[test]
    fn english_toggle_full_and_simple() {
        let generator = PatternGenerator::default();
        let patterns = generator
            .generate(&helpers::toggle(), &helpers::english())
            .unwrap();

        let full = find(&patterns, PatternVariant::Full);
        assert_eq!(full.id, "toggle-en-full");
        assert_eq!(full.priority, 100);
        assert_eq!(full.format(), "toggle {patient} [on {destination}]");

        let simple = find(&patterns, PatternVariant::Simple);
        assert_eq!(simple.priority, 95);
        assert_eq!(simple.format(), "toggle {patient}");

        assert_eq!(
            full.extraction[&SemanticRole::Destination].default,
            Some(polyglot_grammar::RoleValue::reference("me"))
        );
    }

    #[test]
    fn korean_toggle_event_variants() {
        let generator = PatternGenerator::default();
        let schema = CommandSchema::builder("toggle").patient().build();
        let patterns = generator.generate(&schema, &korean()).unwrap();

        assert_eq!(
            formats(&patterns),
            vec![
                ("full".to_string(), 100, "{patient} (를|을) 토글".to_string()),
                (
                    "compact-event".to_string(),
                    152,
                    "{event} 할때 {patient} (를|을) 토글".to_string()
                ),
                (
                    "event-first".to_string(),
                    150,
                    "{event} (할 때|할때) {patient} (를|을) 토글".to_string()
                ),
                ("event-only".to_string(), 148, "{event} (할 때|할때) 토글".to_string()),
                (
                    "patient-first".to_string(),
                    145,
                    "{patient} (를|을) {event} (할 때|할때) 토글".to_string()
                ),
            ]
        );

        let event_only = find(&patterns, PatternVariant::EventOnly);
        assert_eq!(
            event_only.extraction[&SemanticRole::Patient].default,
            Some(polyglot_grammar::RoleValue::reference("me"))
        );
    }

    #[test]
    fn japanese_put_two_role_variants() {
        let generator = PatternGenerator::default();
        let patterns = generator.generate(&helpers::put(), &japanese()).unwrap();

        assert_eq!(
            find(&patterns, PatternVariant::TwoRoleEventFirst).format(),
            "{event} で {patient} を {destination} (に|へ) 置く"
        );
        assert_eq!(
            find(&patterns, PatternVariant::TwoRoleDestinationFirst).format(),
            "{destination} (に|へ) {event} で {patient} を 置く"
        );
        assert_eq!(
            find(&patterns, PatternVariant::PatientDestinationFirst).format(),
            "{patient} を {destination} (に|へ) {event} で 置く"
        );
        assert!(
            patterns
                .iter()
                .all(|pattern| pattern.variant != PatternVariant::EventOnly)
        );
        assert!(
            patterns
                .iter()
                .all(|pattern| pattern.variant != PatternVariant::PatientFirst)
        );
    }

    #[test]
    fn japanese_temporal_variant() {
        let generator = PatternGenerator::default();
        let patterns = generator.generate(&helpers::hide(), &japanese()).unwrap();

        assert_eq!(
            find(&patterns, PatternVariant::Temporal).format(),
            "{event} [の] (時|とき) [{patient} を] 隠す"
        );
    }

    #[test]
    fn arabic_negated_and_proclitic_variants() {
        let generator = PatternGenerator::default();
        let patterns = generator
            .generate(&helpers::hide(), &helpers::arabic())
            .unwrap();

        assert_eq!(
            find(&patterns, PatternVariant::NegatedEvent).format(),
            "(عند|لدى) عدم {event} أخف [{patient}]"
        );
        assert_eq!(
            find(&patterns, PatternVariant::Proclitic).format(),
            "(و|ف) {event} أخف [{patient}]"
        );
    }

    #[test]
    fn missing_keyword_yields_nothing() {
        let generator = PatternGenerator::default();
        let patterns = generator
            .generate(&helpers::increment(), &korean())
            .unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn event_variants_can_be_disabled() {
        let generator = PatternGenerator::new(GeneratorConfig {
            event_handlers: false,
            ..GeneratorConfig::default()
        });
        let patterns = generator.generate(&helpers::toggle(), &korean()).unwrap();
        assert!(patterns.iter().all(|pattern| !pattern.variant.is_event_handler()));
    }

    #[test]
    fn base_priority_shifts_every_variant() {
        let generator = PatternGenerator::new(GeneratorConfig {
            base_priority: 10,
            ..GeneratorConfig::default()
        });
        let patterns = generator.generate(&helpers::hide(), &korean()).unwrap();

        assert_eq!(find(&patterns, PatternVariant::Full).priority, 10);
        assert_eq!(find(&patterns, PatternVariant::Simple).priority, 5);
        assert_eq!(find(&patterns, PatternVariant::EventFirst).priority, 60);
    }

    #[test]
    fn unmarked_roles_without_positions_are_rejected() {
        let profile = LanguageProfile::builder("xx", WordOrder::Svo)
            .keyword("send", KeywordTranslation::new("send"))
            .build();
        let schema = CommandSchema::builder("send")
            .role(RoleSpec::required(SemanticRole::Patient))
            .role(RoleSpec::required(SemanticRole::Destination).svo_position(1))
            .build();

        let result = PatternGenerator::default().generate(&schema, &profile);
        assert!(matches!(
            result,
            Err(GenerateError::UnexpressibleRole { role, .. }) if role == "patient"
        ));
    }

    #[test]
    fn marked_role_without_position_is_fine() {
        let profile = LanguageProfile::builder("xx", WordOrder::Svo)
            .keyword("send", KeywordTranslation::new("send"))
            .role_marker(SemanticRole::Destination, RoleMarker::before("to"))
            .build();
        let schema = CommandSchema::builder("send")
            .role(RoleSpec::required(SemanticRole::Patient))
            .role(RoleSpec::required(SemanticRole::Destination))
            .build();

        let patterns = PatternGenerator::default()
            .generate(&schema, &profile)
            .unwrap();
        assert_eq!(patterns[0].format(), "send {patient} to {destination}");
    }

    #[test]
    fn empty_override_drops_the_marker_token() {
        let generator = PatternGenerator::default();
        let suppressed = CommandSchema::builder("toggle")
            .role(
                RoleSpec::required(SemanticRole::Patient)
                    .sov_position(1)
                    .marker_override("ko", ""),
            )
            .build();

        let patterns = generator.generate(&suppressed, &korean()).unwrap();
        assert_eq!(find(&patterns, PatternVariant::Full).format(), "{patient} 토글");

        let patterns = generator.generate(&helpers::hide(), &korean()).unwrap();
        assert_eq!(
            find(&patterns, PatternVariant::Full).format(),
            "[{patient} (를|을)] 숨기기"
        );
    }

    #[test]
    fn schema_with_event_role_gets_no_event_variants() {
        let schema = CommandSchema::builder("toggle")
            .patient()
            .role(RoleSpec::optional(SemanticRole::Event))
            .build();
        let patterns = PatternGenerator::default()
            .generate(&schema, &korean())
            .unwrap();

        assert_eq!(patterns.len(), 2);
        assert!(patterns.iter().all(|pattern| !pattern.variant.is_event_handler()));
    }
}
