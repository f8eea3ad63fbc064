//! Ratatui widget that renders a [`FileTree`] as an indented, collapsible
//! list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::tree::{FileTree, NodeId};

use super::theme::Theme;

/// Selection and scroll position, persisted across frames.
#[derive(Debug, Default)]
pub struct TreeWidgetState {
    /// Index into the visible row list.
    pub selected: usize,
    /// First visible row.
    pub offset: usize,
}

impl TreeWidgetState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Keep the selection inside the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }
}

pub struct TreeWidget<'a> {
    tree: &'a FileTree,
    block: Option<Block<'a>>,
    focused: bool,
}

impl<'a> TreeWidget<'a> {
    pub fn new(tree: &'a FileTree) -> Self {
        Self {
            tree,
            block: None,
            focused: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn line(&self, id: NodeId, selected: bool) -> Line<'a> {
        let node = self.tree.get(id);
        let icon = match (node.entry.is_dir, node.expanded) {
            (true, true) => "▼ ",
            (true, false) => "▶ ",
            (false, _) => "  ",
        };
        let link = if node.entry.is_symlink { "~" } else { "" };
        let style = if selected {
            Theme::selected_style(self.focused)
        } else if node.entry.is_dir {
            Theme::dir_style()
        } else {
            Theme::file_style()
        };
        let mut spans = vec![
            Span::raw("  ".repeat(node.depth)),
            Span::styled(format!("{icon}{link}{}", node.entry.name), style),
        ];
        if !node.entry.is_dir {
            spans.push(Span::styled(
                format!(" {}", human_size(node.entry.size)),
                if selected { style } else { Theme::size_style() },
            ));
        }
        Line::from(spans)
    }
}

/// `1023 B`, `1.5 KB`, `12.0 MB` …
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

impl StatefulWidget for TreeWidget<'_> {
    type State = TreeWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match self.block {
            Some(ref block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        let rows = self.tree.visible_nodes();
        if !rows.is_empty() {
            state.selected = state.selected.min(rows.len() - 1);
        }
        state.clamp_scroll(inner.height as usize);

        for (i, (row_idx, &id)) in rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(inner.height as usize)
            .enumerate()
        {
            let line = self.line(id, row_idx == state.selected);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::Entry;
    use std::path::PathBuf;

    fn entry(name: &str, is_dir: bool) -> Entry {
        Entry {
            name: name.into(),
            path: PathBuf::from(name),
            is_dir,
            is_symlink: false,
            size: 0,
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn renders_indented_rows_and_scrolls() {
        let mut tree = FileTree::new(entry("root", true));
        let src = tree.add_child(tree.root, entry("src", true));
        tree.add_child(src, entry("main.rs", false));
        tree.add_child(tree.root, entry("Cargo.toml", false));
        tree.get_mut(src).expanded = true;

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TreeWidgetState::default();
        TreeWidget::new(&tree).render(area, &mut buf, &mut state);
        assert_eq!(row(&buf, 0), "▼ root");
        assert_eq!(row(&buf, 1), "  ▼ src");
        assert_eq!(row(&buf, 2), "      main.rs 0 B");

        state.selected = 3;
        let mut buf = Buffer::empty(area);
        TreeWidget::new(&tree).render(area, &mut buf, &mut state);
        assert_eq!(state.offset, 1);
        assert_eq!(row(&buf, 2), "    Cargo.toml 0 B");
    }

    #[test]
    fn symlinked_dirs_show_their_state() {
        let mut tree = FileTree::new(entry("root", true));
        let link = tree.add_child(
            tree.root,
            Entry {
                is_symlink: true,
                ..entry("linked", true)
            },
        );
        let area = Rect::new(0, 0, 20, 2);

        let mut buf = Buffer::empty(area);
        TreeWidget::new(&tree).render(area, &mut buf, &mut TreeWidgetState::default());
        assert_eq!(row(&buf, 1), "  ▶ ~linked");

        tree.get_mut(link).expanded = true;
        let mut buf = Buffer::empty(area);
        TreeWidget::new(&tree).render(area, &mut buf, &mut TreeWidgetState::default());
        assert_eq!(row(&buf, 1), "  ▼ ~linked");
    }

    #[test]
    fn human_sizes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn selection_clamps_to_rows() {
        let tree = FileTree::new(entry("root", true));
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let mut state = TreeWidgetState {
            selected: 9,
            offset: 0,
        };
        TreeWidget::new(&tree).render(area, &mut buf, &mut state);
        assert_eq!(state.selected, 0);
    }
}
