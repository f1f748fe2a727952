//! Position-tracked input for the reader.

use crate::reader::Location;

/// An input to parse: a source name plus its full contents.
///
/// The name is what error locations report; file inputs use the path,
/// in-memory inputs default to `"(string)"`.
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Source {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a whole file; the location name is the path.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Ok(Source::new(path.to_string_lossy(), text))
    }

    /// Wrap an in-memory string with a placeholder name.
    pub fn from_string(text: impl Into<String>) -> Self {
        Source::new("(string)", text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A cursor at the start of the input.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            name: &self.name,
            buffer: self.text.as_bytes(),
            offset: 0,
            line: 0,
            column: 0,
        }
    }
}

/// A position in a shared input buffer.
///
/// The buffer itself is borrowed and never copied; a backtracking attempt
/// copies only this struct, so abandoning an attempt costs nothing and
/// cannot disturb the cursor it started from.
///
/// Lines and columns are counted from 0 here and fixed up to 1-based
/// only when building a [`Location`] for output.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    name: &'a str,
    buffer: &'a [u8],
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    /// True if any input remains.
    pub fn has_input(&self) -> bool {
        self.offset < self.buffer.len()
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.offset..]
    }

    /// The byte at the current offset, if any.
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.offset).copied()
    }

    /// Advance by `n` bytes, keeping line/column bookkeeping consistent:
    /// a newline starts the next line at column 0, a carriage return
    /// moves the offset without counting a column.
    pub fn advance(&mut self, n: usize) {
        let end = std::cmp::min(self.offset + n, self.buffer.len());
        while self.offset < end {
            match self.buffer[self.offset] {
                b'\n' => {
                    self.line += 1;
                    self.column = 0;
                }
                b'\r' => {}
                _ => self.column += 1,
            }
            self.offset += 1;
        }
    }

    /// The current position, 1-based, for error reports.
    pub fn location(&self) -> Location {
        Location {
            name: self.name.to_owned(),
            line: self.line + 1,
            column: self.column + 1,
        }
    }
}
