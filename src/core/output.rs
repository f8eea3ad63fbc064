//! Scrollback buffer behind the output pane.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The `$ command` echo line.
    Echo,
    Output,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub text: String,
    pub at: DateTime<Local>,
}

/// Bounded, line-oriented log.  Oldest lines fall off the front once
/// `capacity` is reached.
#[derive(Debug)]
pub struct OutputLog {
    lines: VecDeque<LogEntry>,
    capacity: usize,
    /// Lines scrolled up from the bottom; 0 means pinned to the newest line.
    scroll_back: usize,
}

impl OutputLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
            scroll_back: 0,
        }
    }

    pub fn echo(&mut self, command: &str) {
        self.push(EntryKind::Echo, &format!("$ {command}"));
    }

    pub fn push_output(&mut self, text: &str) {
        self.push(EntryKind::Output, text);
    }

    pub fn push_error(&mut self, text: &str) {
        self.push(EntryKind::Error, text);
    }

    /// Append `text`, one entry per line.
    pub fn push(&mut self, kind: EntryKind, text: &str) {
        let at = Local::now();
        for line in text.lines() {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(LogEntry {
                kind,
                text: line.to_string(),
                at,
            });
            // Keep the viewport anchored on the same lines while scrolled.
            if self.scroll_back > 0 {
                self.scroll_back += 1;
            }
        }
        self.scroll_back = self.scroll_back.min(self.max_scroll());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_back = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.lines.iter()
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_back = (self.scroll_back + n).min(self.max_scroll());
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(n);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// Entries to show in a viewport `height` rows tall, oldest first.
    pub fn window(&self, height: usize) -> impl Iterator<Item = &LogEntry> {
        let end = self.lines.len().saturating_sub(self.scroll_back);
        let start = end.saturating_sub(height);
        self.lines.range(start..end)
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}
