/// Character-level scanning over a text buffer.
///
/// This module provides the `Scanner` struct, a stateful cursor over an
/// immutable text buffer with character-level stepping and regex-based
/// lookahead/consumption. It is the lowest layer of the tokenizer stack:
/// rule matchers drive a `Scanner`, and the `Tokenizer` drives the rules.
use regex::{Match, Regex};

mod cursor;

pub use cursor::Cursor;

/// Reference point for `Scanner::seek`, analogous to file seek modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Absolute offset from the start of the buffer.
    Set,
    /// Offset relative to the current cursor position.
    Cur,
    /// Offset relative to the end of the buffer.
    End,
}

/// A stateful cursor over a text buffer.
///
/// The scanner borrows the buffer for its whole lifetime and tracks a
/// `Cursor` that always satisfies `0 <= offset <= buffer.len()`. At
/// `offset == buffer.len()` the current character is the empty string --
/// an end-of-buffer sentinel, not an error.
///
/// Line and column reporting is path-independent: seeking directly to an
/// offset yields the same `(line, column)` as stepping there one character
/// at a time with [`Scanner::next`].
#[derive(Debug, Clone)]
pub struct Scanner<'input> {
    text: &'input str,
    cursor: Cursor,
}

impl<'input> Scanner<'input> {
    /// Creates a new scanner positioned at the start of `text`.
    pub fn new(text: &'input str) -> Self {
        Scanner {
            text,
            cursor: Cursor::start(),
        }
    }

    /// Returns the full underlying buffer.
    pub fn text(&self) -> &'input str {
        self.text
    }

    /// Returns the current cursor position.
    pub fn pos(&self) -> Cursor {
        self.cursor
    }

    /// Returns the unconsumed remainder of the buffer.
    pub fn rest(&self) -> &'input str {
        &self.text[self.cursor.offset..]
    }

    /// Returns the character at the cursor as a string slice, or `""` at
    /// the end of the buffer.
    pub fn current(&self) -> &'input str {
        let rest = self.rest();
        match rest.chars().next() {
            Some(ch) => &rest[..ch.len_utf8()],
            None => "",
        }
    }

    /// Checks whether the cursor has reached the end of the buffer.
    pub fn is_at_end(&self) -> bool {
        self.cursor.offset >= self.text.len()
    }

    /// Advances the cursor by exactly one character and returns it, or
    /// does nothing and returns `None` at the end of the buffer.
    ///
    /// A `'\n'` increments the line and resets the column to 1; any other
    /// character increments the column.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.cursor = step(self.cursor, ch);
        Some(ch)
    }

    /// Moves the cursor to an offset relative to `whence`.
    ///
    /// Forward seeks past the end of the buffer clamp to the end. A seek
    /// that would land before position 0 is ignored entirely and leaves the
    /// cursor where it was; only this backward-past-start case is a no-op.
    /// Offsets falling inside a multi-byte character snap back to the
    /// nearest character boundary.
    pub fn seek(&mut self, offset: isize, whence: Whence) {
        let base = match whence {
            Whence::Set => 0,
            Whence::Cur => self.cursor.offset as isize,
            Whence::End => self.text.len() as isize,
        };
        let target = base + offset;
        if target < 0 {
            return;
        }
        let mut target = (target as usize).min(self.text.len());
        while !self.text.is_char_boundary(target) {
            target -= 1;
        }
        self.cursor = if target >= self.cursor.offset {
            advance(self.text, self.cursor, target)
        } else {
            // Backward seeks recount from the start of the buffer so the
            // line/column stay consistent with forward stepping.
            advance(self.text, Cursor::start(), target)
        };
    }

    /// Attempts a regex match anchored at the current offset.
    ///
    /// On success the cursor advances to the end of the match; on failure
    /// the cursor is left untouched. Reported match offsets are absolute
    /// within the buffer.
    pub fn match_here(&mut self, pattern: &Regex) -> Option<Match<'input>> {
        // The leftmost match at or after the cursor starts exactly at the
        // cursor iff an anchored match exists there.
        let found = pattern.find_at(self.text, self.cursor.offset)?;
        if found.start() != self.cursor.offset {
            return None;
        }
        self.advance_to(found.end());
        Some(found)
    }

    /// Searches for `pattern` at or after the current offset.
    ///
    /// Unlike [`Scanner::match_here`] the match need not start at the
    /// cursor. On success the cursor advances to the end of the found
    /// match; on failure it is left untouched.
    pub fn search(&mut self, pattern: &Regex) -> Option<Match<'input>> {
        let found = pattern.find_at(self.text, self.cursor.offset)?;
        self.advance_to(found.end());
        Some(found)
    }

    /// Advances the cursor forward to `offset` (a char boundary at or after
    /// the current position).
    pub(crate) fn advance_to(&mut self, offset: usize) {
        self.cursor = advance(self.text, self.cursor, offset);
    }
}

/// Applies one character to a cursor.
fn step(mut cursor: Cursor, ch: char) -> Cursor {
    if ch == '\n' {
        cursor.line += 1;
        cursor.column = 1;
    } else {
        cursor.column += 1;
    }
    cursor.offset += ch.len_utf8();
    cursor
}

/// Walks `cursor` forward through `text` until it reaches `target`.
///
/// Counting characters from a known cursor keeps seeks path-independent:
/// the per-character rule is the same one `Scanner::next` applies.
fn advance(text: &str, mut cursor: Cursor, target: usize) -> Cursor {
    let mut chars = text[cursor.offset..].chars();
    while cursor.offset < target {
        match chars.next() {
            Some(ch) => cursor = step(cursor, ch),
            None => break,
        }
    }
    cursor
}
