//! Composable token builders.
//!
//! Every generated pattern is assembled from the same few pieces: literal
//! sequences for keywords and markers, a role slot with its marker on the
//! correct side, optional wrapping, and arrangement by word order. The
//! generator and the variant recipes only combine these.

use polyglot_grammar::{MarkerPosition, Normalizer, RoleSpec, SemanticRole, ValueKind, WordOrder};

use crate::token::PatternToken;

/// Literal tokens for a keyword or marker.
///
/// Every spelling is normalized with `normalizer`, word by word. A primary
/// with alternatives becomes one literal carrying them all; the matcher
/// reads a multi-word spelling as one input word per word. A multi-word
/// primary without alternatives is split into one literal per word,
/// matching how the tokenizer splits it. An empty primary yields nothing.
pub fn literal_tokens(
    primary: &str,
    alternatives: &[String],
    normalizer: &dyn Normalizer,
) -> Vec<PatternToken> {
    let Some(value) = spelling(primary, normalizer) else {
        return Vec::new();
    };
    let mut alts: Vec<String> = Vec::new();
    for alt in alternatives.iter().filter_map(|alt| spelling(alt, normalizer)) {
        if alt != value && !alts.contains(&alt) {
            alts.push(alt);
        }
    }
    if alts.is_empty() && value.contains(' ') {
        return value.split(' ').map(PatternToken::literal).collect();
    }
    vec![PatternToken::literal_with(value, alts)]
}

/// The normalized words of `text`, single-spaced. `None` when blank.
fn spelling(text: &str, normalizer: &dyn Normalizer) -> Option<String> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|word| normalizer.normalize(word).into_owned())
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

/// A single fused literal, used for compact marker spellings.
pub fn fused_literal(text: &str, normalizer: &dyn Normalizer) -> PatternToken {
    PatternToken::literal(normalizer.normalize(text.trim()).into_owned())
}

/// The slot for a role value.
pub fn role_slot(role: SemanticRole, optional: bool, expected_types: &[ValueKind]) -> PatternToken {
    PatternToken::Role {
        role,
        optional,
        expected_types: expected_types.to_vec(),
    }
}

/// The slot for a schema role.
pub fn spec_slot(spec: &RoleSpec, optional: bool) -> PatternToken {
    role_slot(spec.role, optional, &spec.expected_types)
}

/// Place `marker` before or after `value`.
pub fn mark(
    value: Vec<PatternToken>,
    marker: Vec<PatternToken>,
    position: MarkerPosition,
) -> Vec<PatternToken> {
    match position {
        MarkerPosition::Before => marker.into_iter().chain(value).collect(),
        MarkerPosition::After => value.into_iter().chain(marker).collect(),
    }
}

/// Wrap `tokens` in an optional group. Nothing to wrap yields nothing.
pub fn optional(tokens: Vec<PatternToken>) -> Vec<PatternToken> {
    if tokens.is_empty() {
        tokens
    } else {
        vec![PatternToken::optional_group(tokens)]
    }
}

/// Arrange the verb and role phrases by word order: verb first for SVO and
/// VSO, verb last for SOV.
pub fn arrange(
    word_order: WordOrder,
    verb: Vec<PatternToken>,
    roles: Vec<PatternToken>,
) -> Vec<PatternToken> {
    if word_order.is_verb_final() {
        roles.into_iter().chain(verb).collect()
    } else {
        verb.into_iter().chain(roles).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_grammar::Normalization;
    use pretty_assertions::assert_eq;

    #[test]
    fn alternatives_are_normalized_and_deduplicated() {
        let tokens = literal_tokens(
            "To",
            &["into".to_string(), "on  to".to_string(), "TO".to_string()],
            &Normalization::Lowercase,
        );
        assert_eq!(
            tokens,
            vec![PatternToken::literal_with(
                "to",
                vec!["into".to_string(), "on to".to_string()]
            )]
        );
    }

    #[test]
    fn multi_word_markers_split_into_literals() {
        let tokens = literal_tokens("할 때", &[], &Normalization::Exact);
        assert_eq!(
            tokens,
            vec![PatternToken::literal("할"), PatternToken::literal("때")]
        );
    }

    #[test]
    fn multi_word_primary_keeps_its_alternatives() {
        let tokens = literal_tokens(
            "토글 하기",
            &["토글".to_string(), "토글하기".to_string()],
            &Normalization::Exact,
        );
        assert_eq!(
            tokens,
            vec![PatternToken::literal_with(
                "토글 하기",
                vec!["토글".to_string(), "토글하기".to_string()]
            )]
        );
        assert_eq!(tokens[0].to_string(), "(토글 하기|토글|토글하기)");
    }

    #[test]
    fn empty_marker_yields_nothing() {
        assert!(literal_tokens("", &[], &Normalization::Exact).is_empty());
        assert!(optional(Vec::new()).is_empty());
    }

    #[test]
    fn mark_respects_position() {
        let value = vec![PatternToken::role(SemanticRole::Patient)];
        let marker = vec![PatternToken::literal("를")];

        assert_eq!(
            mark(value.clone(), marker.clone(), MarkerPosition::After),
            vec![PatternToken::role(SemanticRole::Patient), PatternToken::literal("를")]
        );
        assert_eq!(
            mark(value, marker, MarkerPosition::Before),
            vec![PatternToken::literal("를"), PatternToken::role(SemanticRole::Patient)]
        );
    }

    #[test]
    fn arrange_by_word_order() {
        let verb = vec![PatternToken::literal("v")];
        let roles = vec![PatternToken::role(SemanticRole::Patient)];

        assert_eq!(
            arrange(WordOrder::Sov, verb.clone(), roles.clone()),
            vec![PatternToken::role(SemanticRole::Patient), PatternToken::literal("v")]
        );
        assert_eq!(
            arrange(WordOrder::Vso, verb, roles),
            vec![PatternToken::literal("v"), PatternToken::role(SemanticRole::Patient)]
        );
    }
}
