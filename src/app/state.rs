//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    fs::WalkConfig,
    keyboard::VirtualKeyboard,
    metrics::Snapshot,
    output::OutputLog,
    prompt::{self, History, InputLine},
    tree::{FileTree, NodeId},
};
use crate::ui::tree_widget::TreeWidgetState;

use super::shell_runtime::Job;

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Tree,
}

pub struct AppState {
    /// Directory commands run in; changes only through a successful `cd`.
    pub cwd: PathBuf,
    /// Cached `"{cwd} $"`.
    pub prompt: String,
    pub input: InputLine,
    pub history: History,
    pub output: OutputLog,
    pub keyboard: VirtualKeyboard,
    /// Latest resource reading; `None` until the first poll.
    pub metrics: Option<Snapshot>,
    /// File browser contents.  Its root follows `cwd` but can be moved up
    /// independently from the tree pane.
    pub tree: FileTree,
    pub tree_state: TreeWidgetState,
    pub walk_config: WalkConfig,
    pub focus: Focus,
    pub config: AppConfig,
    /// Commands queued by the handler, drained and spawned by the main loop.
    pub pending_jobs: Vec<Job>,
    /// Commands spawned but not yet finished.
    pub running: usize,
    pub next_job_id: u64,
    pub should_quit: bool,
    /// Transient message shown in the bottom bar instead of the key hints.
    pub status_message: Option<String>,
    /// Full terminal area from the last draw, used for mouse hit-testing.
    pub terminal_area: Rect,
    /// Last left-clicked tree node and click time, for double-click.
    pub last_left_click: Option<(NodeId, Instant)>,
}

impl AppState {
    pub fn new(cwd: PathBuf, tree: FileTree, walk_config: WalkConfig, config: AppConfig) -> Self {
        Self {
            prompt: prompt::prompt_text(&cwd),
            cwd,
            input: InputLine::default(),
            history: History::new(config.history_limit),
            output: OutputLog::new(config.scrollback),
            keyboard: VirtualKeyboard::new(Duration::from_millis(config.flash_ms)),
            metrics: None,
            tree,
            tree_state: TreeWidgetState::default(),
            walk_config,
            focus: Focus::default(),
            config,
            pending_jobs: Vec::new(),
            running: 0,
            next_job_id: 0,
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
            last_left_click: None,
        }
    }
}
