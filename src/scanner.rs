//! Byte cursor primitives over schema text.
//!
//! Every delimiter the schema language cares about is ASCII, so positions
//! returned here always fall on `char` boundaries and can slice the source.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Location, SchemaError, SchemaErrorKind};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(value: &str) -> bool {
    IDENTIFIER.is_match(value)
}

pub const WHITESPACE: &[u8] = b" \t\n\r";
pub const FIELD_BREAK: &[u8] = b";{";

#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    text: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn byte(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.text.get(start..end).unwrap_or_default()
    }

    pub fn starts_with(&self, pos: usize, literal: &str) -> bool {
        self.text.as_bytes().get(pos..).is_some_and(|rest| rest.starts_with(literal.as_bytes()))
    }

    pub fn skip_whitespace(&self, mut pos: usize) -> usize {
        while self.byte(pos).is_some_and(|b| WHITESPACE.contains(&b)) {
            pos += 1;
        }
        pos
    }

    /// Skip any run of `//` comments, each followed by whitespace.
    pub fn skip_comments(&self, mut pos: usize) -> usize {
        while self.starts_with(pos, "//") {
            pos = self.skip_line(pos);
            pos = self.skip_whitespace(pos);
        }
        pos
    }

    /// Whitespace and comments, interleaved in any order.
    pub fn skip_trivia(&self, pos: usize) -> usize {
        let mut pos = self.skip_whitespace(pos);
        loop {
            let next = self.skip_comments(pos);
            if next == pos {
                return pos;
            }
            pos = next;
        }
    }

    /// Position just past the next `\n` (or end of input).
    pub fn skip_line(&self, pos: usize) -> usize {
        match self.find_any(pos, self.len(), b"\n") {
            Some(newline) => newline + 1,
            None => self.len(),
        }
    }

    /// First position in `pos..end` holding a byte of `set`.
    pub fn find_any(&self, pos: usize, end: usize, set: &[u8]) -> Option<usize> {
        let end = end.min(self.len());
        (pos..end).find(|&i| self.byte(i).is_some_and(|b| set.contains(&b)))
    }

    /// End of the token starting at `pos`: the first whitespace byte, byte of
    /// `breaks`, or `end`.
    pub fn token_end(&self, pos: usize, end: usize, breaks: &[u8]) -> usize {
        let end = end.min(self.len());
        let mut cursor = pos;
        while cursor < end {
            match self.byte(cursor) {
                Some(b) if WHITESPACE.contains(&b) || breaks.contains(&b) => break,
                _ => cursor += 1,
            }
        }
        cursor
    }

    /// The `;` or `{` ending a member that started before `pos`. Reaching a
    /// `}` or `end` first means the member was never terminated.
    pub fn find_terminator(&self, pos: usize, end: usize) -> Result<usize, SchemaError> {
        match self.find_any(pos, end, b";{}") {
            Some(found) if self.byte(found) != Some(b'}') => Ok(found),
            _ => Err(self.error(pos, SchemaErrorKind::InvalidTerminator)),
        }
    }

    /// Index of the `}` matching the `{` at `open`, searching no further than
    /// `end`. Braces inside `//` comments do not count.
    pub fn block_end(&self, open: usize, end: usize) -> Result<usize, SchemaError> {
        let end = end.min(self.len());
        let mut depth = 0usize;
        let mut cursor = open;
        while cursor < end {
            if self.starts_with(cursor, "//") {
                cursor = self.skip_line(cursor);
                continue;
            }
            match self.byte(cursor) {
                Some(b'{') => depth += 1,
                Some(b'}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(cursor);
                    }
                }
                _ => {}
            }
            cursor += 1;
        }
        Err(self.error(open, SchemaErrorKind::UnterminatedBlock))
    }

    pub fn location(&self, pos: usize) -> Location {
        let pos = pos.min(self.len());
        let bytes = &self.text.as_bytes()[..pos];
        let line_start = bytes.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        let line = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = match self.text.get(line_start..pos) {
            Some(prefix) => prefix.chars().count() + 1,
            None => pos - line_start + 1,
        };
        Location { line, column }
    }

    pub fn error(&self, pos: usize, kind: SchemaErrorKind) -> SchemaError {
        SchemaError { kind, location: self.location(pos) }
    }
}
