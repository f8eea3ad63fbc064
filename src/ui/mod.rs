//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No filesystem or process I/O happens here.

pub mod keyboard;
pub mod layout;
pub mod output;
pub mod prompt;
pub mod theme;
pub mod tree_widget;

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::state::{AppState, Focus};

use self::{
    keyboard::KeyboardView, layout::AppLayout, output::OutputView, prompt::PromptBar,
    theme::Theme, tree_widget::TreeWidget,
};

fn pane(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style(focused))
        .style(Theme::base_style())
}

/// Render one full frame.
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    state.terminal_area = area;
    frame.render_widget(Block::default().style(Theme::base_style()), area);
    let layout = AppLayout::from_area(area);

    // ── resource monitor ──────────────────────────────────────
    let monitor_block = pane(" System ".into(), false);
    let monitor_inner = monitor_block.inner(layout.monitor_area);
    frame.render_widget(monitor_block, layout.monitor_area);
    match state.metrics {
        Some(snap) => {
            let [label_area, gauge_area] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(40), Constraint::Percentage(25)])
                .areas(monitor_inner);
            frame.render_widget(
                Paragraph::new(snap.label()).style(Theme::monitor_style()),
                label_area,
            );
            frame.render_widget(
                Gauge::default()
                    .gauge_style(Theme::key_lit_style())
                    .ratio(snap.mem_ratio())
                    .label(format!("mem {:.0}%", snap.mem_ratio() * 100.0)),
                gauge_area,
            );
        }
        None => frame.render_widget(
            Paragraph::new("Collecting system info…").style(Theme::monitor_style()),
            monitor_inner,
        ),
    }

    // ── output log ────────────────────────────────────────────
    let scrolled = state.output.scroll_back();
    let title = if scrolled > 0 {
        format!(" Output (↑{scrolled}) ")
    } else {
        " Output ".to_string()
    };
    frame.render_widget(
        OutputView::new(&state.output).block(pane(title, false)),
        layout.output_area,
    );

    // ── prompt + input ────────────────────────────────────────
    let input_focused = state.focus == Focus::Input;
    let bar = PromptBar::new(&state.prompt, &state.input).block(pane(String::new(), input_focused));
    let cursor = bar.cursor_position(layout.input_area);
    frame.render_widget(bar, layout.input_area);
    if input_focused {
        frame.set_cursor_position(cursor);
    }

    // ── file tree ─────────────────────────────────────────────
    let tree_focused = state.focus == Focus::Tree;
    let tree_title = format!(" {} ", state.tree.root_path().display());
    frame.render_stateful_widget(
        TreeWidget::new(&state.tree)
            .focused(tree_focused)
            .block(pane(tree_title, tree_focused)),
        layout.tree_area,
        &mut state.tree_state,
    );

    // ── virtual keyboard ──────────────────────────────────────
    frame.render_widget(
        KeyboardView::new(&state.keyboard, Instant::now()).block(pane(" Keys ".into(), false)),
        layout.keyboard_area,
    );

    // ── status bar ────────────────────────────────────────────
    let hint = state.config.status_bar_hint(tree_focused);
    let left = state.status_message.as_deref().unwrap_or(&hint);
    let mut right = chrono::Local::now().format("%H:%M:%S").to_string();
    if state.running > 0 {
        right = format!("{} running | {right}", state.running);
    }
    let [left_area, right_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right.chars().count() as u16 + 1)])
        .areas(layout.status_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::raw(left))).style(Theme::status_bar_style()),
        left_area,
    );
    frame.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .style(Theme::status_bar_style()),
        right_area,
    );
}
