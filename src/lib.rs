//! Lexer and parser for a small Lisp-like data notation.
//!
//! The notation is parenthesized lists, quoted-cons lists, identifiers,
//! symbols, booleans, characters, strings, and numbers in four integer
//! bases plus float and rational spellings. [`reader`] turns a character
//! buffer into the [`data`] tree and reports failures with 1-based
//! line/column locations.

pub mod data;

pub mod reader;

pub use reader::{parse_file, tokens, Source};
