//! Module for extracting tokens from the input.
//!
//! Classification is "first rule to match wins", not longest-match: the
//! fixed strings are tried in order, then the patterns in order. The
//! ordering is load-bearing — `'a'` must classify as CHAR before the
//! SYMBOL pattern can see it, and every numeric form must be tried
//! before the IDENT catch-all.

use crate::reader::Cursor;

/// The classification of one lexeme.
///
/// `EndOfInput` is produced only when no input remains; `Unknown` when
/// input remains but no rule matches it. `Comment` is reserved and never
/// produced by the current rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Bin,
    Oct,
    Dec,
    Hex,
    Float,
    Rational,
    Char,
    Bool,
    String,
    Symbol,
    ConsStart,
    ListStart,
    ListEnd,
    Comment,
    EndOfInput,
    Unknown,
}

impl TokenKind {
    /// True for the two kinds that end a token stream.
    pub fn is_terminal(self) -> bool {
        matches!(self, TokenKind::EndOfInput | TokenKind::Unknown)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Ident => "IDENT",
            TokenKind::Bin => "BIN",
            TokenKind::Oct => "OCT",
            TokenKind::Dec => "DEC",
            TokenKind::Hex => "HEX",
            TokenKind::Float => "FLT",
            TokenKind::Rational => "RATIONAL",
            TokenKind::Char => "CHAR",
            TokenKind::Bool => "BOOL",
            TokenKind::String => "STRING",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::ConsStart => "CONS_START",
            TokenKind::ListStart => "LIST_START",
            TokenKind::ListEnd => "LIST_END",
            TokenKind::Comment => "COMMENT",
            TokenKind::EndOfInput => "EOI",
            TokenKind::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// Fixed-string rules, tried before the patterns, in this order.
const FIXED: &[(TokenKind, &str)] = &[
    (TokenKind::ListStart, "("),
    (TokenKind::ListEnd, ")"),
    (TokenKind::ConsStart, "'("),
    (TokenKind::Bool, "true"),
    (TokenKind::Bool, "false"),
];

mod regex {
    use super::TokenKind;
    use regex::bytes::Regex;
    use std::sync::OnceLock;

    pub(super) fn space() -> &'static Regex {
        static SPACE: OnceLock<Regex> = OnceLock::new();
        SPACE
            .get_or_init(|| Regex::new(r"\A[ \t\r\n]+").expect("could not compile regex for space"))
    }

    /// The ordered pattern rules. Each is anchored at the match start.
    pub(super) fn patterns() -> &'static [(TokenKind, Regex)] {
        static PATTERNS: OnceLock<Vec<(TokenKind, Regex)>> = OnceLock::new();
        PATTERNS.get_or_init(|| {
            [
                // A quoted single byte, or a named escape, or \xHH.
                // (?-u): classes match single bytes, so a multi-byte
                // character between quotes is not a CHAR.
                (
                    TokenKind::Char,
                    r"\A(?-u)'([^\\]|\\([abftvrn'\\]|x[0-9a-fA-F]{2}))'",
                ),
                // Quote plus identifier-shaped text. Must come after CHAR:
                // a closed one-character quote is a prefix of this.
                (
                    TokenKind::Symbol,
                    r"\A'[a-zA-Z~!@$%^&*_+=|:<>?/]+[a-zA-Z0-9~!@$%^&*_+=|:<>.?/-]*",
                ),
                (TokenKind::Rational, r"\A-?[0-9]+/-?[0-9]+"),
                (TokenKind::Bin, r"\A-?0b[01]+"),
                (TokenKind::Oct, r"\A-?0o[0-7]+"),
                (TokenKind::Hex, r"\A-?0x[0-9a-fA-F]+"),
                // Float spellings, most specific first: exponent, fractional
                // digits, trailing dot, leading dot with exponent, leading dot.
                (TokenKind::Float, r"\A-?[0-9]+\.[0-9]*[eE]-?[0-9]+"),
                (TokenKind::Float, r"\A-?[0-9]+\.[0-9]+"),
                (TokenKind::Float, r"\A-?[0-9]+\."),
                (TokenKind::Float, r"\A-?\.[0-9]+[eE]-?[0-9]+"),
                (TokenKind::Float, r"\A-?\.[0-9]+"),
                (TokenKind::Dec, r"\A-?[0-9]+"),
                (
                    TokenKind::Ident,
                    r"\A[a-zA-Z~!@$%^&*_+=|:<>?/]+[a-zA-Z0-9~!@$%^&*_+=|:<>.?/-]*",
                ),
                // Escape-aware but not escape-decoding; decoding happens in
                // the string production.
                (
                    TokenKind::String,
                    r#"\A(?-u)"([^\\"]|\\([abftvrn"\\]|x[0-9a-fA-F]{2}))*""#,
                ),
            ]
            .into_iter()
            .map(|(kind, pattern)| {
                (
                    kind,
                    Regex::new(pattern).expect("could not compile token pattern"),
                )
            })
            .collect()
        })
    }
}

fn skip_space(cursor: &mut Cursor<'_>) {
    if let Some(space) = regex::space().find(cursor.rest()) {
        cursor.advance(space.len());
    }
}

/// Classify the next lexeme and advance the cursor past it.
///
/// Leading whitespace is skipped before classification and trailing
/// whitespace after it; the returned lexeme excludes both. An `Unknown`
/// result leaves the unrecognized text unconsumed.
pub fn next_token(cursor: &mut Cursor<'_>) -> (TokenKind, String) {
    skip_space(cursor);
    if !cursor.has_input() {
        return (TokenKind::EndOfInput, String::new());
    }

    let rest = cursor.rest();
    let mut found = None;
    for (kind, text) in FIXED {
        if rest.starts_with(text.as_bytes()) {
            found = Some((*kind, (*text).to_owned()));
            break;
        }
    }
    if found.is_none() {
        for (kind, pattern) in regex::patterns() {
            if let Some(m) = pattern.find(rest) {
                let lexeme = std::str::from_utf8(m.as_bytes())
                    .expect("internal error: token pattern matched non-UTF-8 text")
                    .to_owned();
                found = Some((*kind, lexeme));
                break;
            }
        }
    }

    let (kind, lexeme) = match found {
        Some(t) => t,
        None => return (TokenKind::Unknown, String::new()),
    };
    cursor.advance(lexeme.len());
    skip_space(cursor);
    (kind, lexeme)
}

/// A lazy token sequence over a cursor.
///
/// Yields every classified token including the terminal
/// `EndOfInput`/`Unknown`, then fuses.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Tokens {
            cursor,
            done: false,
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = (TokenKind, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (kind, lexeme) = next_token(&mut self.cursor);
        if kind.is_terminal() {
            self.done = true;
        }
        Some((kind, lexeme))
    }
}
