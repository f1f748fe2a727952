//! Recursive-descent productions over the token stream.
//!
//! Each production takes its starting cursor by value and returns the
//! cursor positioned after what it consumed, plus the node it built.
//! The cursor is `Copy`, so alternation hands the same starting position
//! to each alternative in turn; a failed alternative cannot disturb it.
//!
//! Two failure flavors flow through the same `Result` path: a mismatch
//! (the next token is not what the production wanted), which alternation
//! swallows, and a malformed literal (overflow, bad escape), which is
//! fatal and propagates through every choice point.

use std::num::IntErrorKind;

use crate::data::{Atom, File, List, Number, Value};
use crate::reader::{next_token, Cursor, ErrorKind, ParseError, ReadResult, TokenKind};

/// True for failures that alternation may swallow to try the next option.
fn is_mismatch(err: &ParseError) -> bool {
    matches!(
        err.kind,
        ErrorKind::UnexpectedToken | ErrorKind::EndOfInput
    )
}

pub(crate) fn ident(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, String)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    let mut cursor = start;
    let (kind, lexeme) = next_token(&mut cursor);
    if kind != TokenKind::Ident {
        return Err(ParseError::at(
            &start,
            ErrorKind::UnexpectedToken,
            "Expected ident token",
        ));
    }
    Ok((cursor, lexeme))
}

pub(crate) fn number(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, Number)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    let mut cursor = start;
    let (kind, lexeme) = next_token(&mut cursor);
    let number = match kind {
        TokenKind::Bin => Number::Integer(integer(&start, &lexeme, 2)?),
        TokenKind::Oct => Number::Integer(integer(&start, &lexeme, 8)?),
        TokenKind::Hex => Number::Integer(integer(&start, &lexeme, 16)?),
        TokenKind::Dec => Number::Integer(integer(&start, &lexeme, 10)?),
        TokenKind::Float => Number::Float(float(&start, &lexeme)?),
        TokenKind::Rational => {
            let (numerator, denominator) = lexeme
                .split_once('/')
                .ok_or_else(|| {
                    ParseError::at(&start, ErrorKind::BadNumber, "Invalid rational literal")
                })?;
            Number::Rational(
                integer(&start, numerator, 10)?,
                integer(&start, denominator, 10)?,
            )
        }
        _ => {
            return Err(ParseError::at(
                &start,
                ErrorKind::UnexpectedToken,
                "Expected number token",
            ))
        }
    };
    Ok((cursor, number))
}

/// Decode an integer lexeme. The sign stays in place; for the prefixed
/// bases the two-character base marker after it is dropped, and for base
/// 10 the full digit string is parsed.
fn integer(at: &Cursor, lexeme: &str, base: u32) -> ReadResult<i64> {
    let (sign, magnitude) = match lexeme.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", lexeme),
    };
    let digits = if base == 10 { magnitude } else { &magnitude[2..] };
    let text = format!("{}{}", sign, digits);
    i64::from_str_radix(&text, base).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::at(
            at,
            ErrorKind::NumberOverflow,
            "Integer literal too large",
        ),
        _ => ParseError::at(at, ErrorKind::BadNumber, "Invalid integer literal"),
    })
}

fn float(at: &Cursor, lexeme: &str) -> ReadResult<f64> {
    let value: f64 = lexeme.parse().map_err(|_| {
        ParseError::at(
            at,
            ErrorKind::BadNumber,
            "Invalid floating-point number literal",
        )
    })?;
    // The lexeme is all digits, so an infinite result can only mean the
    // literal exceeded the representable range.
    if value.is_infinite() {
        return Err(ParseError::at(
            at,
            ErrorKind::NumberOverflow,
            "Floating-point number literal too large",
        ));
    }
    Ok(value)
}

pub(crate) fn character(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, u8)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    let mut cursor = start;
    let (kind, lexeme) = next_token(&mut cursor);
    if kind != TokenKind::Char {
        return Err(ParseError::at(
            &start,
            ErrorKind::UnexpectedToken,
            "Expected char token",
        ));
    }
    let inner = &lexeme[1..lexeme.len() - 1];
    let byte = match inner.strip_prefix('\\') {
        Some(body) => escape(&start, body)?,
        None => inner.as_bytes()[0],
    };
    Ok((cursor, byte))
}

pub(crate) fn boolean(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, bool)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    let mut cursor = start;
    let (kind, lexeme) = next_token(&mut cursor);
    if kind != TokenKind::Bool {
        return Err(ParseError::at(
            &start,
            ErrorKind::UnexpectedToken,
            "Expected bool token",
        ));
    }
    Ok((cursor, lexeme == "true"))
}

pub(crate) fn string(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, String)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    let mut cursor = start;
    let (kind, lexeme) = next_token(&mut cursor);
    if kind != TokenKind::String {
        return Err(ParseError::at(
            &start,
            ErrorKind::UnexpectedToken,
            "Expected string token",
        ));
    }
    let decoded = decode_string(&start, &lexeme[1..lexeme.len() - 1])?;
    Ok((cursor, decoded))
}

pub(crate) fn symbol(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, String)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    let mut cursor = start;
    let (kind, lexeme) = next_token(&mut cursor);
    if kind != TokenKind::Symbol {
        return Err(ParseError::at(
            &start,
            ErrorKind::UnexpectedToken,
            "Expected symbol token",
        ));
    }
    Ok((cursor, lexeme[1..].to_owned()))
}

/// Decode one escape body (the text after the backslash): a named escape
/// or `xHH` with exactly two hex digits.
fn escape(at: &Cursor, body: &str) -> ReadResult<u8> {
    match body.as_bytes().first() {
        Some(b'a') => Ok(0x07),
        Some(b'b') => Ok(0x08),
        Some(b'f') => Ok(0x0C),
        Some(b'n') => Ok(b'\n'),
        Some(b't') => Ok(b'\t'),
        Some(b'v') => Ok(0x0B),
        Some(b'r') => Ok(b'\r'),
        Some(b'\'') => Ok(b'\''),
        Some(b'"') => Ok(b'"'),
        Some(b'\\') => Ok(b'\\'),
        Some(b'x') => {
            if body.len() == 3 {
                u8::from_str_radix(&body[1..3], 16).map_err(|_| {
                    ParseError::at(at, ErrorKind::BadEscape, "Invalid escape sequence")
                })
            } else {
                Err(ParseError::at(
                    at,
                    ErrorKind::BadEscape,
                    "\\x escape sequences must have two hex chars",
                ))
            }
        }
        _ => Err(ParseError::at(
            at,
            ErrorKind::BadEscape,
            "Invalid escape sequence",
        )),
    }
}

/// Decode the text between a string's quotes.
fn decode_string(at: &Cursor, inner: &str) -> ReadResult<String> {
    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let body = &inner[i + 1..];
            let consumed = if body.as_bytes().first() == Some(&b'x') {
                3
            } else {
                1
            };
            if body.len() < consumed {
                return Err(ParseError::at(
                    at,
                    ErrorKind::BadEscape,
                    "Invalid escape sequence",
                ));
            }
            out.push(escape(at, &body[..consumed])?);
            i += 1 + consumed;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| {
        ParseError::at(at, ErrorKind::BadEscape, "Escape does not decode to UTF-8")
    })
}

pub(crate) fn atom(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, Atom)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    match number(start) {
        Ok((cursor, n)) => return Ok((cursor, Atom::Number(n))),
        Err(e) if !is_mismatch(&e) => return Err(e),
        Err(_) => {}
    }
    match boolean(start) {
        Ok((cursor, b)) => return Ok((cursor, Atom::Bool(b))),
        Err(e) if !is_mismatch(&e) => return Err(e),
        Err(_) => {}
    }
    match ident(start) {
        Ok((cursor, name)) => return Ok((cursor, Atom::Ident(name))),
        Err(e) if !is_mismatch(&e) => return Err(e),
        Err(_) => {}
    }
    match character(start) {
        Ok((cursor, c)) => return Ok((cursor, Atom::Char(c))),
        Err(e) if !is_mismatch(&e) => return Err(e),
        Err(_) => {}
    }
    match string(start) {
        Ok((cursor, s)) => return Ok((cursor, Atom::String(s))),
        Err(e) if !is_mismatch(&e) => return Err(e),
        Err(_) => {}
    }
    match symbol(start) {
        Ok((cursor, name)) => return Ok((cursor, Atom::Symbol(name))),
        Err(e) if !is_mismatch(&e) => return Err(e),
        Err(_) => {}
    }
    Err(ParseError::at(
        &start,
        ErrorKind::UnexpectedToken,
        "Expected ident, number, bool, char, string, or symbol token",
    ))
}

pub(crate) fn list(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, List)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    let mut cursor = start;
    let (kind, _) = next_token(&mut cursor);
    let is_cons = match kind {
        TokenKind::ListStart => false,
        TokenKind::ConsStart => true,
        _ => {
            return Err(ParseError::at(
                &start,
                ErrorKind::UnexpectedToken,
                "Expected list or cons start token",
            ))
        }
    };
    tracing::trace!("list open at {}", start.location());

    let mut items = Vec::new();
    while cursor.has_input() {
        match value(cursor) {
            Ok((next, v)) => {
                items.push(v);
                cursor = next;
            }
            Err(e) if is_mismatch(&e) => break,
            Err(e) => return Err(e),
        }
    }

    let close = cursor;
    let (kind, _) = next_token(&mut cursor);
    if kind != TokenKind::ListEnd {
        return Err(ParseError::at(
            &close,
            ErrorKind::UnterminatedList,
            "Expected closing ')'",
        ));
    }
    Ok((cursor, List { items, is_cons }))
}

pub(crate) fn value(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, Value)> {
    if !start.has_input() {
        return Err(ParseError::end_of_input(&start));
    }
    match list(start) {
        Ok((cursor, l)) => return Ok((cursor, l.into())),
        Err(e) if !is_mismatch(&e) => return Err(e),
        Err(_) => {}
    }
    match atom(start) {
        Ok((cursor, a)) => return Ok((cursor, a.into())),
        Err(e) if !is_mismatch(&e) => return Err(e),
        Err(_) => {}
    }
    Err(ParseError::at(
        &start,
        ErrorKind::UnexpectedToken,
        "Expected list or atom",
    ))
}

pub(crate) fn file(start: Cursor<'_>) -> ReadResult<(Cursor<'_>, File)> {
    tracing::trace!("parsing file at {}", start.location());
    let mut cursor = start;
    let mut exprs = Vec::new();
    while cursor.has_input() {
        let (next, v) = value(cursor)?;
        exprs.push(v);
        cursor = next;
    }
    Ok((cursor, File { exprs }))
}
