//! Support for reading expressions from text.
//!
//! The reader is split into three layers: a position-tracked [`Cursor`]
//! over the input, a tokenizer that classifies one lexeme at a time, and
//! recursive-descent productions that build the [`crate::data`] tree.
//! Every failure carries the 1-based line and column it happened at.

use std::io::ErrorKind as IoErrorKind;

mod cursor;
mod parse;
mod token;

pub use cursor::{Cursor, Source};
pub use token::{next_token, TokenKind, Tokens};

/// Parse the whole input as a sequence of expressions.
pub fn parse_file(cursor: Cursor<'_>) -> ReadResult<crate::data::File> {
    let (_, file) = parse::file(cursor)?;
    Ok(file)
}

/// The lazy token sequence for the input, ending with `EOI` or `UNKNOWN`.
pub fn tokens(cursor: Cursor<'_>) -> Tokens<'_> {
    Tokens::new(cursor)
}

/// A position in a named input, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.line, self.column)
    }
}

/// What went wrong, beyond the message text.
///
/// The propagation mechanism does not distinguish a grammar-alternative
/// mismatch from a malformed literal — both travel the same `Result`
/// path — but consumers can branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A production needed a token but the input was exhausted.
    EndOfInput,
    /// The next token was not one the production accepts.
    UnexpectedToken,
    /// A character or string escape sequence that doesn't decode.
    BadEscape,
    /// A numeric literal with residual syntax problems.
    BadNumber,
    /// A numeric literal that doesn't fit its type.
    NumberOverflow,
    /// A list that reached the end of its alternatives without a `)`.
    UnterminatedList,
}

/// A located parse failure.
///
/// `found` is the character at the failure offset; it is `None` at end
/// of input, which is never read past.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Location,
    pub found: Option<char>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message, self.location)?;
        match self.found {
            Some(c) => write!(f, " char '{}'", c),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// An error at the cursor's position, capturing the offending
    /// character if one exists.
    pub fn at(cursor: &Cursor<'_>, kind: ErrorKind, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            message: message.into(),
            location: cursor.location(),
            found: cursor.peek().map(char::from),
        }
    }

    /// The fixed end-of-input failure.
    pub fn end_of_input(cursor: &Cursor<'_>) -> Self {
        ParseError::at(cursor, ErrorKind::EndOfInput, "End of input")
    }
}

/// The main result type for this module: a T (token, node, etc) or a
/// located error.
pub type ReadResult<T> = Result<T, ParseError>;

impl From<ParseError> for std::io::Error {
    fn from(value: ParseError) -> Self {
        let kind = match value.kind {
            ErrorKind::EndOfInput => IoErrorKind::UnexpectedEof,
            _ => IoErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_format() {
        let loc = Location {
            name: "input.lisp".to_owned(),
            line: 3,
            column: 5,
        };
        assert_eq!(format!("{}", loc), "input.lisp:3:5");
    }

    #[test]
    fn error_format_includes_char() {
        let source = Source::new("t", ",");
        let err = ParseError::at(
            &source.cursor(),
            ErrorKind::UnexpectedToken,
            "Expected ident token",
        );
        assert_eq!(format!("{}", err), "Expected ident token at t:1:1 char ','");
    }

    #[test]
    fn end_of_input_has_no_char() {
        let source = Source::new("t", "");
        let err = ParseError::end_of_input(&source.cursor());
        assert_eq!(err.kind, ErrorKind::EndOfInput);
        assert_eq!(format!("{}", err), "End of input at t:1:1");
    }
}
