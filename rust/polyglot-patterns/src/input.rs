//! Input tokens, as the matcher consumes them.
//!
//! Tokenization belongs to an external collaborator that knows the input
//! language: it splits text into words, quoted strings, selectors, numbers
//! and so on, and delivers multi-word values (a quoted string, a nested
//! expression) as a single pre-delimited token. The matcher only compares
//! literal text and checks value shapes.
//!
//! A small whitespace tokenizer is included for demos and tests. It knows no
//! language rules beyond quoting and a few value shapes.

use std::fmt;

use polyglot_grammar::{RoleValue, ValueKind};

/// A single token of input, as delivered by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The token text as written (quotes stripped from strings).
    pub text: String,
    pub kind: ValueKind,
}

impl Token {
    pub fn new(kind: ValueKind, text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            kind,
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Word, text)
    }

    pub fn selector(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Selector, text)
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(ValueKind::String, text)
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Number, text)
    }

    /// The value this token contributes when bound to a role.
    pub fn to_value(&self) -> RoleValue {
        RoleValue::new(self.kind, self.text.clone())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValueKind::String => write!(f, "\"{}\"", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Words that refer to an element or value in context.
const REFERENCES: &[&str] = &["me", "it", "you", "result"];

fn is_numeric(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit()) && text.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Classify a whitespace-free chunk of input.
fn classify(chunk: &str) -> ValueKind {
    let Some(first) = chunk.chars().next() else {
        return ValueKind::Word;
    };
    if matches!(first, '.' | '#' | '<' | '@' | '*') && chunk.chars().count() > 1 {
        return ValueKind::Selector;
    }
    let digits = chunk.trim_start_matches('-');
    if is_numeric(digits) {
        return ValueKind::Number;
    }
    for unit in ["ms", "s"] {
        if let Some(amount) = digits.strip_suffix(unit) {
            if is_numeric(amount) {
                return ValueKind::Duration;
            }
        }
    }
    if REFERENCES
        .iter()
        .any(|reference| reference.eq_ignore_ascii_case(chunk))
    {
        return ValueKind::Reference;
    }
    ValueKind::Word
}

/// Tokenize input text into a sequence of tokens.
///
/// Splits on whitespace. Text between double or single quotes becomes one
/// `String` token with the quotes removed. Everything else is classified by
/// shape: selectors (`.a`, `#b`, `<p/>`, `@attr`, `*prop`), numbers,
/// durations (`2s`, `300ms`) and the references `me`, `it`, `you` and
/// `result`; the rest are words.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == '"' || ch == '\'' {
            chars.next();
            let mut literal = String::new();
            for next in chars.by_ref() {
                if next == ch {
                    break;
                }
                literal.push(next);
            }
            tokens.push(Token::string(literal));
            continue;
        }

        let mut chunk = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_whitespace() {
                break;
            }
            chunk.push(next);
            chars.next();
        }
        tokens.push(Token::new(classify(&chunk), chunk));
    }

    tokens
}
