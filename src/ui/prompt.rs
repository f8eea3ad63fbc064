//! The `"{path} $"` prompt followed by the editable command line.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::prompt::InputLine;

use super::theme::Theme;

pub struct PromptBar<'a> {
    prompt: &'a str,
    input: &'a InputLine,
    block: Option<Block<'a>>,
}

impl<'a> PromptBar<'a> {
    pub fn new(prompt: &'a str, input: &'a InputLine) -> Self {
        Self {
            prompt,
            input,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Where the terminal cursor belongs when the input has focus.
    pub fn cursor_position(&self, area: Rect) -> Position {
        let inner = self.inner(area);
        let layout = Fitted::new(self.prompt, self.input, inner.width as usize);
        let x = inner.x as usize + layout.prompt.chars().count() + 1 + layout.cursor;
        Position::new(
            x.min((inner.x + inner.width.saturating_sub(1)) as usize) as u16,
            inner.y,
        )
    }

    fn inner(&self, area: Rect) -> Rect {
        self.block.as_ref().map_or(area, |b| b.inner(area))
    }
}

impl Widget for PromptBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.inner(area);
        if let Some(block) = self.block {
            block.render(area, buf);
        }
        let fitted = Fitted::new(self.prompt, self.input, inner.width as usize);
        let line = Line::from(vec![
            Span::styled(fitted.prompt, Theme::title_style()),
            Span::styled(" ", Theme::base_style()),
            Span::styled(fitted.text, Theme::base_style()),
        ]);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}

/// Prompt and input trimmed to fit `width` cells.  A long prompt is cut from
/// the left (the tail of the path matters most); a long input scrolls so the
/// cursor stays visible.
struct Fitted {
    prompt: String,
    text: String,
    /// Cursor column relative to the start of `text`.
    cursor: usize,
}

impl Fitted {
    fn new(prompt: &str, input: &InputLine, width: usize) -> Self {
        // Always leave at least half the row for typing.
        let prompt = tail(prompt, width / 2);
        let room = width.saturating_sub(prompt.chars().count() + 1).max(1);

        let chars: Vec<char> = input.text().chars().collect();
        let cursor = input.cursor();
        let start = (cursor + 1).saturating_sub(room);
        let text: String = chars.iter().skip(start).take(room).collect();
        Self {
            prompt,
            text,
            cursor: cursor - start,
        }
    }
}

fn tail(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::from("…");
    out.extend(s.chars().skip(n - (max - 1)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> InputLine {
        let mut line = InputLine::default();
        line.set(text);
        line
    }

    fn rendered(bar: PromptBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn renders_prompt_then_input() {
        let line = input("ls");
        assert_eq!(rendered(PromptBar::new("/tmp $", &line), 12), "/tmp $ ls   ");
        let pos = PromptBar::new("/tmp $", &line).cursor_position(Rect::new(0, 0, 12, 1));
        assert_eq!(pos, Position::new(9, 0));
    }

    #[test]
    fn long_prompt_keeps_its_tail() {
        let line = input("");
        let out = rendered(PromptBar::new("/a/very/long/path $", &line), 16);
        assert!(out.starts_with("…/path $"), "{out}");
    }

    #[test]
    fn long_input_scrolls_with_cursor() {
        let line = input("abcdefghij");
        // prompt "$" + space leaves 4 columns.
        let out = rendered(PromptBar::new("$", &line), 6);
        assert_eq!(out, "$ hij ");
        let pos = PromptBar::new("$", &line).cursor_position(Rect::new(0, 0, 6, 1));
        assert_eq!(pos, Position::new(5, 0));
    }
}
