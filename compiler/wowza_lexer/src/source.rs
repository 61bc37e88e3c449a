//! Line-buffered character source.
//!
//! Reads one line at a time from a [`BufRead`] and hands out characters with
//! one character of lookahead. A zero-length read marks end of stream. The
//! cursor only moves forward.

use std::io::{self, BufRead};

use crate::Position;

pub struct LineSource<R> {
    reader: R,
    /// Current line, including its terminator.
    line: String,
    /// Byte offset of the next character in `line`.
    offset: usize,
    position: Position,
    eof: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            reader,
            line: String::new(),
            offset: 0,
            position: Position::START,
            eof: false,
        }
    }

    /// The next character, without consuming it. `None` at end of stream.
    pub fn peek(&mut self) -> io::Result<Option<char>> {
        if self.offset >= self.line.len() && !self.eof {
            self.refill()?;
        }
        Ok(self.line[self.offset..].chars().next())
    }

    /// Consume and return the next character.
    pub fn advance(&mut self) -> io::Result<Option<char>> {
        let next = self.peek()?;
        if let Some(c) = next {
            self.offset += c.len_utf8();
            if c == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        Ok(next)
    }

    /// Position of the next character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the underlying reader has reported end of stream and the
    /// buffered line is used up.
    pub fn is_exhausted(&self) -> bool {
        self.eof && self.offset >= self.line.len()
    }

    /// Release the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn refill(&mut self) -> io::Result<()> {
        self.line.clear();
        self.offset = 0;
        let read = self.reader.read_line(&mut self.line)?;
        if read == 0 {
            self.eof = true;
        }
        tracing::trace!(line = self.position.line, bytes = read, "refilled line buffer");
        Ok(())
    }
}
