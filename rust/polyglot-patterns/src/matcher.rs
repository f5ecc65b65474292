//! Matching input tokens against generated patterns.
//!
//! Patterns are tried in descending priority, ties broken by id, and the
//! first one that consumes the whole input wins. Within a pattern:
//!
//! - a literal matches word tokens whose normalized text spells the literal
//!   or one of its alternatives, one token per word of the spelling;
//! - a role slot consumes exactly one token, of an expected shape if any are
//!   declared;
//! - a group matches entirely or, if optional, is skipped entirely. An
//!   optional group is tried taken first, then skipped when the rest of the
//!   pattern fails after it. It never matches in part.
//!
//! Omitted optional roles then take the defaults from the pattern's
//! extraction rules.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use polyglot_grammar::{Normalizer, RoleValue, SemanticRole};

use crate::command::{CanonicalCommand, NoMatch};
use crate::corpus::PatternCorpus;
use crate::input::Token;
use crate::pattern::LanguagePattern;
use crate::token::PatternToken;

/// Match `tokens` against the corpus patterns for `language`.
pub fn match_tokens(
    tokens: &[Token],
    language: &str,
    corpus: &PatternCorpus,
) -> Result<CanonicalCommand, NoMatch> {
    let patterns = corpus.patterns(language);
    let normalizer = corpus.normalizer(language);
    match_patterns(tokens, language, patterns, normalizer)
}

/// Match `tokens` against an arbitrary set of patterns.
///
/// The patterns need not be sorted; the result depends only on the set.
pub fn match_patterns(
    tokens: &[Token],
    language: &str,
    patterns: &[LanguagePattern],
    normalizer: &dyn Normalizer,
) -> Result<CanonicalCommand, NoMatch> {
    let mut ranked: Vec<&LanguagePattern> = patterns
        .iter()
        .filter(|pattern| pattern.language == language)
        .collect();
    ranked.sort_by(|left, right| {
        (Reverse(left.priority), &left.id).cmp(&(Reverse(right.priority), &right.id))
    });

    let mut furthest: Option<(&str, usize)> = None;
    for pattern in &ranked {
        let mut attempt = Attempt {
            input: tokens,
            normalizer,
            furthest: 0,
        };
        let mut bindings = BTreeMap::new();

        if attempt.sequence(&pattern.tokens, &mut Vec::new(), 0, &mut bindings) {
            tracing::trace!(pattern = %pattern.id, "pattern matched");
            return Ok(canonical(pattern, bindings));
        }

        tracing::trace!(
            pattern = %pattern.id,
            consumed = attempt.furthest,
            "pattern rejected"
        );
        if furthest.is_none_or(|(_, best)| attempt.furthest > best) {
            furthest = Some((pattern.id.as_str(), attempt.furthest));
        }
    }

    tracing::debug!(
        language,
        tried = ranked.len(),
        tokens = tokens.len(),
        "no pattern matched"
    );
    Err(NoMatch {
        language: language.to_string(),
        furthest_pattern_id: furthest.map(|(id, _)| id.to_string()),
        furthest_token_index: furthest.map(|(_, index)| index).unwrap_or_default(),
        tried_pattern_count: ranked.len(),
    })
}

fn canonical(
    pattern: &LanguagePattern,
    mut roles: BTreeMap<SemanticRole, RoleValue>,
) -> CanonicalCommand {
    for (role, rule) in &pattern.extraction {
        if let Some(default) = &rule.default {
            roles.entry(*role).or_insert_with(|| default.clone());
        }
    }
    CanonicalCommand {
        action: pattern.command.clone(),
        roles,
        pattern_id: pattern.id.clone(),
        variant: pattern.variant,
    }
}

/// One attempt of one pattern against the input.
struct Attempt<'a> {
    input: &'a [Token],
    normalizer: &'a dyn Normalizer,
    /// How many tokens the attempt got through at most, counting groups
    /// that were later abandoned.
    furthest: usize,
}

impl Attempt<'_> {
    /// Match `tokens` at `cursor`, then everything on `rest` (innermost
    /// last), and require the input to end there.
    ///
    /// Every choice point (an optional group taken or skipped, one spelling
    /// of a literal or another) is retried when the remainder fails, so the
    /// first choice never shadows a later one. Bindings made on a failed
    /// branch are rolled back.
    fn sequence<'p>(
        &mut self,
        tokens: &'p [PatternToken],
        rest: &mut Vec<&'p [PatternToken]>,
        cursor: usize,
        bindings: &mut BTreeMap<SemanticRole, RoleValue>,
    ) -> bool {
        let Some((token, tail)) = tokens.split_first() else {
            return match rest.pop() {
                Some(next) => {
                    let matched = self.sequence(next, rest, cursor, bindings);
                    rest.push(next);
                    matched
                }
                None => cursor == self.input.len(),
            };
        };

        match token {
            PatternToken::Literal {
                value,
                alternatives,
            } => std::iter::once(value).chain(alternatives).any(|spelling| {
                self.spelled(spelling, cursor).is_some_and(|next| {
                    self.reach(next);
                    self.sequence(tail, rest, next, bindings)
                })
            }),
            PatternToken::Role {
                role,
                expected_types,
                ..
            } => {
                let Some(input) = self.input.get(cursor) else {
                    return false;
                };
                if !expected_types.is_empty() && !expected_types.contains(&input.kind) {
                    return false;
                }
                self.reach(cursor + 1);
                let previous = bindings.insert(*role, input.to_value());
                if self.sequence(tail, rest, cursor + 1, bindings) {
                    return true;
                }
                match previous {
                    Some(value) => bindings.insert(*role, value),
                    None => bindings.remove(role),
                };
                false
            }
            PatternToken::Group {
                optional,
                tokens: inner,
            } => {
                rest.push(tail);
                let taken = self.sequence(inner, rest, cursor, bindings);
                rest.pop();
                taken || (*optional && self.sequence(tail, rest, cursor, bindings))
            }
        }
    }

    /// The cursor after `spelling` when the input spells it at `cursor`.
    /// A multi-word spelling spans one input word per word.
    fn spelled(&self, spelling: &str, cursor: usize) -> Option<usize> {
        let mut next = cursor;
        for word in spelling.split_whitespace() {
            let input = self.input.get(next)?;
            if !input.kind.is_literal_like() || !self.normalizer.equivalent(word, &input.text) {
                return None;
            }
            next += 1;
        }
        (next > cursor).then_some(next)
    }

    fn reach(&mut self, cursor: usize) {
        self.furthest = self.furthest.max(cursor);
    }
}
