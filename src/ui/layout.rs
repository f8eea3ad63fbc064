//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Left column: monitor label, output log and prompt.  Right column: file
/// tree over the virtual keyboard.  Status bar along the bottom.
pub struct AppLayout {
    pub monitor_area: Rect,
    pub output_area: Rect,
    pub input_area: Rect,
    pub tree_area: Rect,
    pub keyboard_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let [body, status_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .areas(area);

        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
            .areas(body);

        let [monitor_area, output_area, input_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .areas(left);

        let [tree_area, keyboard_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)])
            .areas(right);

        Self {
            monitor_area,
            output_area,
            input_area,
            tree_area,
            keyboard_area,
            status_area,
        }
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panes_tile_the_screen() {
        let l = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        assert_eq!(l.status_area, Rect::new(0, 39, 120, 1));
        assert_eq!(l.monitor_area.height, 3);
        assert_eq!(l.input_area.height, 3);
        assert_eq!(l.output_area.height, 33);
        assert_eq!(l.monitor_area.width, 80);
        assert_eq!(l.tree_area.x, 80);
        assert_eq!(l.tree_area.height + l.keyboard_area.height, 39);
        assert!(point_in_rect(l.tree_area, 80, 0));
        assert!(!point_in_rect(l.tree_area, 79, 0));
    }
}
