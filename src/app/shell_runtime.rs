//! Background command execution so a slow command never blocks the UI.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::core::shell::{self, CommandOutput, ShellConfig, ShellError};

/// A command line queued for execution.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: u64,
    pub line: String,
    pub cwd: PathBuf,
    pub shell: ShellConfig,
}

#[derive(Debug)]
pub enum ShellUpdate {
    Finished {
        id: u64,
        line: String,
        result: Result<CommandOutput, ShellError>,
    },
}

pub fn spawn_command(tx: mpsc::UnboundedSender<ShellUpdate>, job: Job) {
    std::thread::spawn(move || {
        let t0 = std::time::Instant::now();
        let result = shell::run(&job.shell, &job.line, &job.cwd);
        tracing::debug!(
            id = job.id,
            elapsed = ?t0.elapsed(),
            status = ?result.as_ref().ok().and_then(|o| o.status),
            "command finished: {}",
            job.line
        );
        let _ = tx.send(ShellUpdate::Finished {
            id: job.id,
            line: job.line,
            result,
        });
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_output_over_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_command(
            tx,
            Job {
                id: 7,
                line: "echo hi".into(),
                cwd: std::env::temp_dir(),
                shell: ShellConfig::default(),
            },
        );
        let ShellUpdate::Finished { id, line, result } = rx.recv().await.unwrap();
        assert_eq!(id, 7);
        assert_eq!(line, "echo hi");
        assert_eq!(result.unwrap().stdout.trim(), "hi");
    }
}
