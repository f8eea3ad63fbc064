//! Command-line classification and pass-through execution.
//!
//! Nothing here interprets shell syntax.  A line is either one of the few
//! words handled in-process (`cd`, `clear`, `exit`) or it is handed verbatim
//! to the platform shell.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0} is not a valid directory.")]
    NotADirectory(String),
    #[error("could not start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// A submitted input line after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `cd` with its (trimmed) argument, `None` for a bare `cd`.
    ChangeDir(Option<String>),
    Clear,
    Exit,
    External(String),
}

/// Classify a line.  Blank lines yield `None`.
pub fn parse(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "cd" {
        return Some(Command::ChangeDir(None));
    }
    if let Some(rest) = trimmed.strip_prefix("cd") {
        if rest.starts_with(char::is_whitespace) {
            return Some(Command::ChangeDir(Some(rest.trim().to_string())));
        }
    }
    Some(match trimmed {
        "clear" => Command::Clear,
        "exit" => Command::Exit,
        _ => Command::External(line.to_string()),
    })
}

/// Resolve a `cd` argument against `cwd`.  The result is canonical and is
/// guaranteed to be an existing directory.
pub fn resolve_dir(cwd: &Path, arg: Option<&str>) -> Result<PathBuf, ShellError> {
    resolve_dir_from(cwd, arg, home_dir().as_deref())
}

/// [`resolve_dir`] with an explicit home directory for `~`.
fn resolve_dir_from(
    cwd: &Path,
    arg: Option<&str>,
    home: Option<&Path>,
) -> Result<PathBuf, ShellError> {
    let shown = arg.unwrap_or("~").to_string();
    let home_or_err = || home.ok_or_else(|| ShellError::NotADirectory(shown.clone()));
    let target = match arg {
        None | Some("~") => home_or_err()?.to_path_buf(),
        Some(a) => match a.strip_prefix("~/") {
            Some(rest) => home_or_err()?.join(rest),
            None => cwd.join(a),
        },
    };
    if !target.is_dir() {
        return Err(ShellError::NotADirectory(shown));
    }
    target
        .canonicalize()
        .map_err(|_| ShellError::NotADirectory(shown))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

// ───────────────────────────────────────── execution ─────────

/// Which program receives command lines, e.g. `sh -c` or `cmd /C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub program: String,
    pub flag: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        if cfg!(windows) {
            Self {
                program: "cmd".into(),
                flag: "/C".into(),
            }
        } else {
            Self {
                program: "sh".into(),
                flag: "-c".into(),
            }
        }
    }
}

impl ShellConfig {
    /// Parse `"program flag"` (e.g. `"bash -c"`).  A lone program name gets
    /// the platform default flag.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let program = parts.next()?.to_string();
        let flag = parts
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| Self::default().flag);
        Some(Self { program, flag })
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.program, self.flag)
    }
}

/// Captured result of an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when terminated by a signal.
    pub status: Option<i32>,
}

impl CommandOutput {
    /// Lines destined for the output log: stdout as-is, stderr tagged as an
    /// error.  Surrounding whitespace is dropped and empty streams are skipped.
    pub fn into_log_lines(self) -> Vec<(bool, String)> {
        let mut out = Vec::new();
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            out.push((false, stdout.to_string()));
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            out.push((true, format!("Error: {stderr}")));
        }
        out
    }
}

/// Run `line` through the configured shell in `cwd`, blocking until it exits.
pub fn run(shell: &ShellConfig, line: &str, cwd: &Path) -> Result<CommandOutput, ShellError> {
    let output = std::process::Command::new(&shell.program)
        .arg(&shell.flag)
        .arg(line)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| ShellError::Spawn {
            command: shell.program.clone(),
            source,
        })?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_lines() {
        assert_eq!(parse("   "), None);
        assert_eq!(parse("cd"), Some(Command::ChangeDir(None)));
        assert_eq!(
            parse("cd  /tmp "),
            Some(Command::ChangeDir(Some("/tmp".into())))
        );
        assert_eq!(parse("clear"), Some(Command::Clear));
        assert_eq!(parse(" exit "), Some(Command::Exit));
        // Not a `cd`: no separating whitespace.
        assert_eq!(parse("cdk version"), Some(Command::External("cdk version".into())));
        assert_eq!(parse("ls -la"), Some(Command::External("ls -la".into())));
    }

    #[test]
    fn resolves_relative_dirs() {
        let base = std::env::temp_dir().join(format!("termy-cd-{}", std::process::id()));
        std::fs::create_dir_all(base.join("sub")).unwrap();
        std::fs::write(base.join("file"), "x").unwrap();

        let got = resolve_dir(&base, Some("sub")).unwrap();
        assert_eq!(got, base.join("sub").canonicalize().unwrap());

        let got = resolve_dir(&base.join("sub"), Some("..")).unwrap();
        assert_eq!(got, base.canonicalize().unwrap());

        let err = resolve_dir(&base, Some("file")).unwrap_err();
        assert_eq!(err.to_string(), "file is not a valid directory.");
        assert!(resolve_dir(&base, Some("nope")).is_err());

        std::fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn tilde_and_bare_cd_go_home() {
        let home = std::env::temp_dir().join(format!("termy-home-{}", std::process::id()));
        std::fs::create_dir_all(home.join("sub")).unwrap();
        let cwd = std::env::temp_dir();
        let canonical = home.canonicalize().unwrap();

        assert_eq!(resolve_dir_from(&cwd, None, Some(&home)).unwrap(), canonical);
        assert_eq!(resolve_dir_from(&cwd, Some("~"), Some(&home)).unwrap(), canonical);
        assert_eq!(
            resolve_dir_from(&cwd, Some("~/sub"), Some(&home)).unwrap(),
            canonical.join("sub")
        );

        let err = resolve_dir_from(&cwd, Some("~/missing"), Some(&home)).unwrap_err();
        assert_eq!(err.to_string(), "~/missing is not a valid directory.");
        let err = resolve_dir_from(&cwd, None, None).unwrap_err();
        assert_eq!(err.to_string(), "~ is not a valid directory.");

        std::fs::remove_dir_all(&home).unwrap();
    }

    #[test]
    fn shell_config_parse() {
        let s = ShellConfig::parse("bash -lc").unwrap();
        assert_eq!(s.program, "bash");
        assert_eq!(s.flag, "-lc");
        assert_eq!(ShellConfig::parse("zsh").unwrap().flag, ShellConfig::default().flag);
        assert!(ShellConfig::parse("  ").is_none());
    }

    #[test]
    fn log_lines_skip_empty_streams() {
        let out = CommandOutput {
            stdout: "hello\n".into(),
            stderr: "  \n".into(),
            status: Some(0),
        };
        assert_eq!(out.into_log_lines(), vec![(false, "hello".to_string())]);

        let out = CommandOutput {
            stdout: String::new(),
            stderr: "boom\n".into(),
            status: Some(1),
        };
        assert_eq!(out.into_log_lines(), vec![(true, "Error: boom".to_string())]);
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_given_directory() {
        let dir = std::env::temp_dir().canonicalize().unwrap();
        let out = run(&ShellConfig::default(), "pwd; echo oops >&2", &dir).unwrap();
        assert_eq!(out.stdout.trim(), dir.display().to_string());
        assert_eq!(out.stderr.trim(), "oops");
        assert_eq!(out.status, Some(0));
    }

    #[test]
    fn missing_shell_is_a_spawn_error() {
        let shell = ShellConfig {
            program: "definitely-not-a-real-shell-binary".into(),
            flag: "-c".into(),
        };
        let err = run(&shell, "true", &std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, ShellError::Spawn { .. }));
    }
}
