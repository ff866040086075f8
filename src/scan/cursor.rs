//! Explicit cursor over an immutable line sequence.
//!
//! Scanners advance through the input one line at a time and look ahead by
//! index when a field's value may continue on later lines. Keeping the
//! position in one place makes each state machine auditable on its own.

pub(crate) struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// Current line without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume and return the current line.
    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Line at an absolute index, for lookahead that must not consume.
    pub fn line_at(&self, idx: usize) -> Option<&'a str> {
        self.lines.get(idx).copied()
    }

    /// Skip blank lines from the current position.
    pub fn skip_blank(&mut self) {
        while let Some(line) = self.peek() {
            if !line.trim().is_empty() {
                break;
            }
            self.pos += 1;
        }
    }

    /// Index of the first non-blank line at or after `from`.
    pub fn next_non_blank(&self, from: usize) -> Option<usize> {
        (from..self.lines.len()).find(|&i| !self.lines[i].trim().is_empty())
    }
}
