//! On-screen keyboard: a staggered grid of letter keys that flash while the
//! matching letter is typed.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::core::keyboard::VirtualKeyboard;

use super::theme::Theme;

/// Cell size of a boxed key (border + letter + border).
const KEY_W: u16 = 5;
const KEY_H: u16 = 3;

pub struct KeyboardView<'a> {
    keyboard: &'a VirtualKeyboard,
    now: Instant,
    block: Option<Block<'a>>,
}

impl<'a> KeyboardView<'a> {
    pub fn new(keyboard: &'a VirtualKeyboard, now: Instant) -> Self {
        Self {
            keyboard,
            now,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn key_style(&self, key: char) -> ratatui::style::Style {
        if self.keyboard.is_lit(key, self.now) {
            Theme::key_lit_style()
        } else {
            Theme::key_style()
        }
    }

    /// Rounded 5x3 boxes, each row shifted right by half a key.
    fn render_boxed(&self, area: Rect, buf: &mut Buffer) {
        for (r, row) in self.keyboard.rows().enumerate() {
            let y = area.y + r as u16 * KEY_H;
            let indent = r as u16 * KEY_W / 2;
            for (c, key) in row.chars().enumerate() {
                let x = area.x + indent + c as u16 * KEY_W;
                let cell = Rect::new(x, y, KEY_W, KEY_H).intersection(area);
                if cell.width < KEY_W {
                    break;
                }
                let style = self.key_style(key);
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style)
                    .style(style)
                    .render(cell, buf);
                buf.set_string(x + KEY_W / 2, y + 1, key.to_string(), style);
            }
        }
    }

    /// One text row per keyboard row, for panes too small for boxes.
    fn render_compact(&self, area: Rect, buf: &mut Buffer) {
        for (r, row) in self.keyboard.rows().enumerate().take(area.height as usize) {
            let y = area.y + r as u16;
            let mut x = area.x + r as u16;
            for key in row.chars() {
                if x + 3 > area.x + area.width {
                    break;
                }
                buf.set_string(x, y, format!(" {key} "), self.key_style(key));
                x += 4;
            }
        }
    }
}

impl Widget for KeyboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(ref block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        let widest = self.keyboard.rows().map(str::len).max().unwrap_or(0) as u16 * KEY_W;
        if inner.height >= 3 * KEY_H && inner.width >= widest {
            self.render_boxed(inner, buf);
        } else {
            self.render_compact(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn lit_key_uses_highlight_style() {
        let mut kb = VirtualKeyboard::new(Duration::from_millis(200));
        let now = Instant::now();
        kb.press('w', now);

        let area = Rect::new(0, 0, 60, 9);
        let mut buf = Buffer::empty(area);
        KeyboardView::new(&kb, now).render(area, &mut buf);

        // Q is the first key, W the second; letters sit in the box centre.
        assert_eq!(buf[(2, 1)].symbol(), "Q");
        assert_eq!(buf[(7, 1)].symbol(), "W");
        assert_eq!(buf[(7, 1)].style().bg, Theme::key_lit_style().bg);
        assert_eq!(buf[(2, 1)].style().bg, Theme::key_style().bg);
        // Second row is staggered by half a key.
        assert_eq!(buf[(4, 4)].symbol(), "A");
    }

    #[test]
    fn small_area_falls_back_to_compact_rows() {
        let kb = VirtualKeyboard::default();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        KeyboardView::new(&kb, Instant::now()).render(area, &mut buf);
        assert_eq!(buf[(1, 0)].symbol(), "Q");
        assert_eq!(buf[(2, 1)].symbol(), "A");
        assert_eq!(buf[(3, 2)].symbol(), "Z");
    }
}
