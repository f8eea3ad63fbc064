//! Prompt text, the editable input line and submitted-command history.

use std::collections::VecDeque;
use std::path::Path;

/// `"{path} $"`, shown in front of the input field.
pub fn prompt_text(cwd: &Path) -> String {
    format!("{} $", cwd.display())
}

// ───────────────────────────────────────── input line ────────

/// Single-line text buffer with a character-indexed cursor.
#[derive(Debug, Default)]
pub struct InputLine {
    text: String,
    /// Cursor position in chars (not bytes).
    cursor: usize,
}

impl InputLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the whole line and park the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    /// Return the line and leave the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

// ───────────────────────────────────────── history ───────────

/// Previously submitted lines, newest last.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
    /// Index into `entries` while browsing; `None` when editing a fresh line.
    cursor: Option<usize>,
    /// What the user had typed before starting to browse.
    draft: String,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            cursor: None,
            draft: String::new(),
        }
    }

    /// Record a submitted line.  Blank lines and immediate repeats are skipped.
    pub fn push(&mut self, line: &str) {
        self.reset();
        if line.trim().is_empty() || self.entries.back().is_some_and(|l| l == line) {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
    }

    /// Step back in time.  `current` is what the input holds right now.
    pub fn prev(&mut self, current: &str) -> Option<&str> {
        let idx = match self.cursor {
            None if self.entries.is_empty() => return None,
            None => {
                self.draft = current.to_string();
                self.entries.len() - 1
            }
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    /// Step forward; past the newest entry the draft comes back.
    pub fn next(&mut self) -> Option<&str> {
        let i = self.cursor?;
        if i + 1 < self.entries.len() {
            self.cursor = Some(i + 1);
            self.entries.get(i + 1).map(String::as_str)
        } else {
            self.cursor = None;
            Some(self.draft.as_str())
        }
    }

    /// Stop browsing (called whenever the user edits the line).
    pub fn reset(&mut self) {
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_format() {
        assert_eq!(prompt_text(Path::new("/home/me")), "/home/me $");
    }

    #[test]
    fn edits_multibyte_text() {
        let mut line = InputLine::default();
        for ch in "héllo".chars() {
            line.insert(ch);
        }
        line.left();
        line.left();
        line.backspace();
        assert_eq!(line.text(), "hélo");
        line.home();
        line.delete();
        assert_eq!(line.text(), "élo");
        line.end();
        line.insert('!');
        assert_eq!(line.take(), "élo!");
        assert_eq!(line.text(), "");
        assert_eq!(line.cursor(), 0);
    }

    #[test]
    fn history_browsing_restores_draft() {
        let mut h = History::new(10);
        h.push("ls");
        h.push("pwd");
        h.push("pwd");
        h.push("  ");

        assert_eq!(h.prev("ec"), Some("pwd"));
        assert_eq!(h.prev("pwd"), Some("ls"));
        assert_eq!(h.prev("ls"), Some("ls"));
        assert_eq!(h.next(), Some("pwd"));
        assert_eq!(h.next(), Some("ec"));
        assert_eq!(h.next(), None);
    }

    #[test]
    fn history_limit() {
        let mut h = History::new(2);
        h.push("a");
        h.push("b");
        h.push("c");
        assert_eq!(h.prev(""), Some("c"));
        assert_eq!(h.prev(""), Some("b"));
        assert_eq!(h.prev(""), Some("b"));
    }
}
