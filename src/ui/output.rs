//! Read-only view of the output log.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Widget},
};

use crate::core::output::{EntryKind, OutputLog};

use super::theme::Theme;

pub struct OutputView<'a> {
    log: &'a OutputLog,
    block: Option<Block<'a>>,
}

impl<'a> OutputView<'a> {
    pub fn new(log: &'a OutputLog) -> Self {
        Self { log, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for OutputView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        for (i, entry) in self.log.window(inner.height as usize).enumerate() {
            let style = match entry.kind {
                EntryKind::Echo => Theme::echo_style(),
                EntryKind::Output => Theme::output_style(),
                EntryKind::Error => Theme::error_style(),
            };
            // Tabs would desync cell widths.
            let text = entry.text.replace('\t', "    ");
            let line = Line::styled(text, style);
            let y = inner.y + i as u16;
            let (end_x, _) = buf.set_line(inner.x, y, &line, inner.width);

            // Echo lines carry their submission time on the right edge.
            if entry.kind == EntryKind::Echo {
                let stamp = entry.at.format("%H:%M:%S").to_string();
                let stamp_x = (inner.x + inner.width).saturating_sub(stamp.len() as u16);
                if stamp_x > end_x {
                    buf.set_string(stamp_x, y, stamp, Theme::timestamp_style());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_newest_lines_at_bottom() {
        let mut log = OutputLog::new(50);
        log.echo("seq 3");
        log.push_output("1\n2\n3");

        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        OutputView::new(&log).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "2");
        assert_eq!(buf[(0, 1)].symbol(), "3");

        log.scroll_up(3);
        let mut buf = Buffer::empty(area);
        OutputView::new(&log).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "$");
        assert_eq!(buf[(2, 0)].symbol(), "s");
    }

    #[test]
    fn echo_lines_get_a_timestamp_when_room() {
        let mut log = OutputLog::new(10);
        log.echo("ls");
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        OutputView::new(&log).render(area, &mut buf);
        // HH:MM:SS occupies the last 8 columns.
        assert_eq!(buf[(14, 0)].symbol(), ":");
        assert_eq!(buf[(17, 0)].symbol(), ":");
    }
}
