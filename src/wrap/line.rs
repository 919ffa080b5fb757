use crate::width::{rune_width, str_width};
use tracing::trace;

/// Scanner state while folding one logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Dropping whitespace at the start of a physical line.
    SkipLeadingSpace,
    /// Filling the line buffer.
    Normal,
}

/// Outcome of feeding one code point to the state machine.
enum Step {
    /// The code point was consumed; continue in the given state.
    Next(State),
    /// The code point must be fed again in the given state.
    Retry(State),
}

/// Code points of the physical line being built, with their running width.
#[derive(Debug, Default)]
struct LineBuffer {
    chars: Vec<char>,
    width: usize,
}

impl LineBuffer {
    fn from_chars(chars: Vec<char>) -> Self {
        let width = chars.iter().copied().map(rune_width).sum();
        Self { chars, width }
    }

    fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn push(&mut self, c: char, width: usize) {
        self.chars.push(c);
        self.width += width;
    }

    /// Index of the most recent whitespace among the last `window` code points.
    fn recent_whitespace(&self, window: usize) -> Option<usize> {
        let start = self.chars.len().saturating_sub(window);
        (start..self.chars.len())
            .rev()
            .find(|&i| self.chars[i].is_whitespace())
    }

    fn take(&mut self) -> Vec<char> {
        self.width = 0;
        std::mem::take(&mut self.chars)
    }
}

fn trimmed(chars: &[char]) -> String {
    let line: String = chars.iter().collect();
    line.trim().to_string()
}

/// Greedy wrapper for a single logical line (no line breaks inside).
///
/// Each overflow either breaks at the most recent whitespace within the
/// last `lookback` code points of the buffer, or, when there is none,
/// hyphenates the buffer before its final code point. A single glyph wider
/// than `max_width` can still produce an over-long line.
pub(crate) struct LineWrapper<'a> {
    max_width: usize,
    lookback: usize,
    hyphen: &'a str,
    state: State,
    buffer: LineBuffer,
    lines: Vec<String>,
}

impl<'a> LineWrapper<'a> {
    pub(crate) fn new(max_width: usize, lookback: usize, hyphen: &'a str) -> Self {
        Self {
            max_width,
            lookback,
            hyphen,
            state: State::SkipLeadingSpace,
            buffer: LineBuffer::default(),
            lines: Vec::new(),
        }
    }

    /// Folds `line` into physical lines. Never returns an empty vector.
    pub(crate) fn wrap(mut self, line: &str) -> Vec<String> {
        for c in line.chars() {
            loop {
                match self.step(c) {
                    Step::Next(next) => {
                        self.state = next;
                        break;
                    }
                    Step::Retry(next) => self.state = next,
                }
            }
        }

        if !self.buffer.is_empty() {
            let rest = self.buffer.take();
            self.emit(trimmed(&rest));
        }

        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines
    }

    fn step(&mut self, c: char) -> Step {
        match self.state {
            State::SkipLeadingSpace if c.is_whitespace() => Step::Next(State::SkipLeadingSpace),
            State::SkipLeadingSpace => Step::Retry(State::Normal),
            State::Normal => Step::Next(self.fill(c)),
        }
    }

    fn fill(&mut self, c: char) -> State {
        let width = rune_width(c);
        if self.buffer.is_empty() || self.buffer.width + width <= self.max_width {
            self.buffer.push(c, width);
            return State::Normal;
        }

        // Overflowing whitespace ends the line and is dropped.
        if c.is_whitespace() {
            let full = self.buffer.take();
            self.emit(trimmed(&full));
            return State::SkipLeadingSpace;
        }

        let split = self.buffer.recent_whitespace(self.lookback);
        let mut chars = self.buffer.take();
        match split {
            Some(split) => {
                let carry = chars.split_off(split + 1);
                self.emit(trimmed(&chars[..split]));
                self.buffer = LineBuffer::from_chars(carry);
            }
            None => {
                let last = chars.pop();
                let mut head = trimmed(&chars);
                head.push_str(self.hyphen);
                trace!(line = %head, "forced hyphenation");
                self.emit(head);
                self.buffer = LineBuffer::from_chars(last.into_iter().collect());
            }
        }
        self.buffer.push(c, width);
        State::Normal
    }

    fn emit(&mut self, line: String) {
        trace!(line = %line, width = str_width(&line), "line emitted");
        self.lines.push(line);
    }
}
