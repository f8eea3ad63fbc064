//! Input handling — maps key/mouse events and command results to state
//! mutations.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::{
    fs,
    prompt,
    shell::{self, Command},
    tree::NodeId,
};
use crate::ui::layout::{point_in_rect, AppLayout};

use super::shell_runtime::{Job, ShellUpdate};
use super::state::{AppState, Focus};

const DOUBLE_CLICK: Duration = Duration::from_millis(250);
const SCROLL_STEP: usize = 3;

/// Process a key event.  `now` drives the keyboard flash.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let action = state.config.match_key(key);
    if let Some(action) = action.filter(|a| a.is_global()) {
        match action {
            Action::SwitchFocus => {
                state.focus = match state.focus {
                    Focus::Input => Focus::Tree,
                    Focus::Tree => Focus::Input,
                };
                state.status_message = None;
            }
            Action::ClearOutput => state.output.clear(),
            Action::Quit => state.should_quit = true,
            _ => {}
        }
        return;
    }

    match state.focus {
        Focus::Input => handle_input_key(state, key, now),
        Focus::Tree => {
            if let Some(action) = action {
                handle_tree_action(state, action);
            }
        }
    }
}

/// Bracketed paste goes straight into the input line.  Newlines are
/// flattened; pasting never submits.
pub fn handle_paste(state: &mut AppState, text: &str) {
    state.focus = Focus::Input;
    state.history.reset();
    for ch in text.chars() {
        state.input.insert(if ch == '\n' || ch == '\r' { ' ' } else { ch });
    }
}

// ── Command input ────────────────────────────────────────────────

fn handle_input_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // AltGr arrives as Ctrl+Alt on Windows; those chars are text.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Enter => submit(state),
        KeyCode::Char(ch) if !ctrl => {
            state.keyboard.press(ch, now);
            state.input.insert(ch);
            state.history.reset();
        }
        KeyCode::Char('u') if ctrl => {
            state.input.take();
        }
        KeyCode::Backspace => {
            state.input.backspace();
            state.history.reset();
        }
        KeyCode::Delete => state.input.delete(),
        KeyCode::Left => state.input.left(),
        KeyCode::Right => state.input.right(),
        KeyCode::Home => state.input.home(),
        KeyCode::End => state.input.end(),
        KeyCode::Up => {
            if let Some(line) = state.history.prev(state.input.text()).map(str::to_string) {
                state.input.set(&line);
            }
        }
        KeyCode::Down => {
            if let Some(line) = state.history.next().map(str::to_string) {
                state.input.set(&line);
            }
        }
        KeyCode::PageUp => {
            let n = page(state);
            state.output.scroll_up(n);
        }
        KeyCode::PageDown => {
            let n = page(state);
            state.output.scroll_down(n);
        }
        KeyCode::Esc => {
            state.input.take();
            state.history.reset();
        }
        _ => {}
    }
}

fn page(state: &AppState) -> usize {
    let layout = AppLayout::from_area(state.terminal_area);
    (layout.output_area.height.saturating_sub(2) as usize).max(1)
}

/// Take the input line and act on it.
pub fn submit(state: &mut AppState) {
    let line = state.input.take();
    state.history.push(&line);
    let Some(command) = shell::parse(&line) else {
        return;
    };

    state.output.scroll_to_bottom();
    state.output.echo(&line);
    match command {
        Command::ChangeDir(arg) => change_dir(state, arg.as_deref()),
        Command::Clear => state.output.clear(),
        Command::Exit => state.should_quit = true,
        Command::External(line) => {
            let id = state.next_job_id;
            state.next_job_id += 1;
            state.running += 1;
            tracing::info!(id, cwd = %state.cwd.display(), "run: {line}");
            state.pending_jobs.push(Job {
                id,
                line,
                cwd: state.cwd.clone(),
                shell: state.config.shell.clone(),
            });
        }
    }
}

/// Resolve a `cd` target; on success update the prompt and re-root the tree.
fn change_dir(state: &mut AppState, arg: Option<&str>) {
    match shell::resolve_dir(&state.cwd, arg) {
        Ok(dir) => {
            tracing::info!("cd {}", dir.display());
            state.prompt = prompt::prompt_text(&dir);
            state.cwd = dir.clone();
            reroot_tree(state, dir);
        }
        Err(err) => state.output.push_error(&format!("Error: {err}")),
    }
}

/// Fold a finished background command into the output log.
pub fn apply_shell_update(state: &mut AppState, update: ShellUpdate) {
    match update {
        ShellUpdate::Finished { id, line, result } => {
            state.running = state.running.saturating_sub(1);
            match result {
                Ok(output) => {
                    for (is_err, text) in output.into_log_lines() {
                        if is_err {
                            state.output.push_error(&text);
                        } else {
                            state.output.push_output(&text);
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(id, "`{line}` failed: {err}");
                    state.output.push_error(&format!("Command failed: {err}"));
                }
            }
        }
    }
}

// ── File tree ────────────────────────────────────────────────────

fn handle_tree_action(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.tree_state.select_prev(),
        Action::MoveDown => {
            let count = state.tree.visible_nodes().len();
            state.tree_state.select_next(count);
        }
        Action::Expand => {
            if let Some(id) = selected_node_id(state) {
                expand(state, id);
            }
        }
        Action::Collapse => handle_collapse(state),
        Action::CdIntoDir => {
            let Some(id) = selected_node_id(state) else {
                return;
            };
            let entry = &state.tree.get(id).entry;
            if !entry.is_dir {
                state.status_message = Some(format!("{} is not a directory", entry.name));
                return;
            }
            let target = entry.path.display().to_string();
            state.output.scroll_to_bottom();
            state.output.echo(&format!("cd {target}"));
            state.history.push(&format!("cd {target}"));
            change_dir(state, Some(target.as_str()));
        }
        Action::ToggleHidden => {
            state.walk_config.show_hidden = !state.walk_config.show_hidden;
            let root = state.tree.root_path().to_path_buf();
            reroot_tree(state, root);
            state.status_message = Some(format!(
                "Hidden files {}",
                if state.walk_config.show_hidden { "shown" } else { "hidden" }
            ));
        }
        Action::SwitchFocus | Action::ClearOutput | Action::Quit => {}
    }
}

fn expand(state: &mut AppState, id: NodeId) {
    if !state.tree.get(id).entry.is_dir {
        return;
    }
    fs::expand_node(&mut state.tree, id, &state.walk_config);
    state.tree.get_mut(id).expanded = true;
}

/// Collapse an expanded dir, otherwise jump to (and collapse) the parent.
/// On the root, move the browser up one level.
fn handle_collapse(state: &mut AppState) {
    let Some(id) = selected_node_id(state) else {
        return;
    };
    if id == state.tree.root {
        move_root_to_parent(state);
        return;
    }

    let node = state.tree.get(id);
    if node.entry.is_dir && node.expanded {
        state.tree.get_mut(id).expanded = false;
    } else if let Some(parent) = node.parent {
        state.tree.get_mut(parent).expanded = false;
        if let Some(row) = state.tree.visible_nodes().iter().position(|&n| n == parent) {
            state.tree_state.selected = row;
        }
    }
}

fn move_root_to_parent(state: &mut AppState) {
    let Some(parent) = state.tree.root_path().parent().map(|p| p.to_path_buf()) else {
        state.status_message = Some("Already at filesystem root".to_string());
        return;
    };
    let child = state.tree.root_path().to_path_buf();
    if reroot_tree(state, parent) {
        // Keep the directory we came from selected.
        if let Some(id) = state.tree.find(&child) {
            if let Some(row) = state.tree.visible_nodes().iter().position(|&n| n == id) {
                state.tree_state.selected = row;
            }
        }
    }
}

fn reroot_tree(state: &mut AppState, root: PathBuf) -> bool {
    match fs::build_tree(&root, &state.walk_config) {
        Ok(tree) => {
            state.tree = tree;
            state.tree_state.reset();
            true
        }
        Err(err) => {
            state.status_message = Some(format!("Cannot open {}: {err}", root.display()));
            false
        }
    }
}

fn selected_node_id(state: &AppState) -> Option<NodeId> {
    state
        .tree
        .visible_nodes()
        .get(state.tree_state.selected)
        .copied()
}

// ── Mouse ────────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    let layout = AppLayout::from_area(state.terminal_area);
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.input_area, col, row)
                || point_in_rect(layout.output_area, col, row)
            {
                state.focus = Focus::Input;
                return;
            }
            if !point_in_rect(layout.tree_area, col, row) {
                return;
            }
            state.focus = Focus::Tree;

            let top = layout.tree_area.y + 1;
            let bottom = layout.tree_area.y + layout.tree_area.height.saturating_sub(1);
            if row < top || row >= bottom {
                return;
            }
            let clicked = (row - top) as usize + state.tree_state.offset;
            let Some(&id) = state.tree.visible_nodes().get(clicked) else {
                return;
            };
            state.tree_state.selected = clicked;

            let double = matches!(
                state.last_left_click,
                Some((prev, at)) if prev == id && now.duration_since(at) <= DOUBLE_CLICK
            );
            if double {
                state.last_left_click = None;
                toggle_dir(state, id);
            } else {
                state.last_left_click = Some((id, now));
            }
        }
        MouseEventKind::ScrollUp => {
            if point_in_rect(layout.tree_area, col, row) {
                state.tree_state.select_prev();
            } else if point_in_rect(layout.output_area, col, row) {
                state.output.scroll_up(SCROLL_STEP);
            }
        }
        MouseEventKind::ScrollDown => {
            if point_in_rect(layout.tree_area, col, row) {
                let count = state.tree.visible_nodes().len();
                state.tree_state.select_next(count);
            } else if point_in_rect(layout.output_area, col, row) {
                state.output.scroll_down(SCROLL_STEP);
            }
        }
        _ => {}
    }
}

fn toggle_dir(state: &mut AppState, id: NodeId) {
    if id == state.tree.root {
        move_root_to_parent(state);
    } else if state.tree.get(id).expanded {
        state.tree.get_mut(id).expanded = false;
    } else {
        expand(state, id);
    }
}
