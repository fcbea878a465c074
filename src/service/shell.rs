//! Simulated shell for MockDrive.
//!
//! Executes a small command set (`ls`, `cd`, `pwd`, `mkdir`, `help`)
//! against the mock store, producing the output/error/new-path triple a
//! terminal page consumes. `clear` is listed in the help text but
//! handled by the hosting terminal, not here.

use tracing::debug;

use crate::config::SimulationConfig;
use crate::store::{path, SharedStore, ROOT_PATH};

use super::Latency;

/// Help text printed by the `help` command.
const HELP_TEXT: &str = "Available commands:\n  ls [path]       List directory contents\n  cd <directory>  Change directory\n  pwd             Print working directory\n  mkdir <name>    Create directory\n  clear           Clear the terminal\n  help            Show this help message";

/// Result of one simulated shell command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Text to print on success.
    pub output: Option<String>,
    /// Error line to print instead.
    pub error: Option<String>,
    /// New working directory, when the command changed it.
    pub new_path: Option<String>,
}

impl CommandOutcome {
    fn output(text: impl Into<String>) -> Self {
        Self {
            output: Some(text.into()),
            ..Self::default()
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            error: Some(text.into()),
            ..Self::default()
        }
    }

    fn chdir(path: impl Into<String>) -> Self {
        Self {
            new_path: Some(path.into()),
            ..Self::default()
        }
    }
}

/// Simulated shell over a shared mock store.
#[derive(Debug, Clone)]
pub struct ShellService {
    store: SharedStore,
    latency: Latency,
    /// Owner recorded on nodes created via `mkdir`.
    owner: String,
}

impl ShellService {
    /// Create a new ShellService.
    pub fn new(store: SharedStore, sim: &SimulationConfig, owner: impl Into<String>) -> Self {
        Self {
            store,
            latency: Latency::for_shell(sim),
            owner: owner.into(),
        }
    }

    /// Execute one command line in the given working directory.
    ///
    /// Never fails: problems are reported through the outcome's `error`
    /// field, shell style. Blank input produces an empty outcome.
    pub async fn execute(&self, command_line: &str, current_path: &str) -> CommandOutcome {
        self.latency.pause().await;

        let trimmed = command_line.trim();
        if trimmed.is_empty() {
            return CommandOutcome::default();
        }

        let mut parts = trimmed.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();
        debug!(command = %command, cwd = %current_path, "shell command");

        match command.as_str() {
            "ls" => self.ls(args.first().copied(), current_path),
            "cd" => self.cd(args.first().copied(), current_path),
            "pwd" => CommandOutcome::output(current_path),
            "mkdir" => self.mkdir(args.first().copied(), current_path),
            "help" => CommandOutcome::output(HELP_TEXT),
            _ => CommandOutcome::error(format!("{command}: command not found")),
        }
    }

    fn ls(&self, arg: Option<&str>, current_path: &str) -> CommandOutcome {
        let target = match arg {
            Some(a) => path::resolve(current_path, a),
            None => path::normalize(current_path),
        };

        match self.store.read().list(&target) {
            Ok(items) if items.is_empty() => CommandOutcome::output("(empty)"),
            Ok(items) => {
                let listing = items
                    .iter()
                    .map(|item| {
                        if item.is_directory {
                            format!("{}/", item.name)
                        } else {
                            item.name.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                CommandOutcome::output(listing)
            }
            Err(_) => CommandOutcome::error(format!(
                "ls: cannot access '{}': No such file or directory",
                arg.unwrap_or(&target)
            )),
        }
    }

    fn cd(&self, arg: Option<&str>, current_path: &str) -> CommandOutcome {
        let Some(arg) = arg else {
            return CommandOutcome::error("cd: missing operand");
        };

        let target = path::resolve(current_path, arg);
        if target == ROOT_PATH {
            return CommandOutcome::chdir(ROOT_PATH);
        }

        let store = self.store.read();
        match store.find(&target) {
            Some(node) if node.is_directory => CommandOutcome::chdir(target),
            Some(_) => CommandOutcome::error(format!("cd: {arg}: Not a directory")),
            None => CommandOutcome::error(format!("cd: {arg}: No such file or directory")),
        }
    }

    fn mkdir(&self, arg: Option<&str>, current_path: &str) -> CommandOutcome {
        let Some(name) = arg else {
            return CommandOutcome::error("mkdir: missing operand");
        };

        let mut store = self.store.write();
        let cwd = path::normalize(current_path);
        if !store.dir_exists(&cwd) {
            return CommandOutcome::error(format!(
                "mkdir: cannot create directory '{name}': Current path '{cwd}' does not exist"
            ));
        }

        // Unlike the folder API, the shell refuses any same-name sibling.
        let collides = store
            .list(&cwd)
            .map(|children| children.iter().any(|n| n.name == name))
            .unwrap_or(false);
        if collides {
            return CommandOutcome::error(format!(
                "mkdir: cannot create directory '{name}': File exists"
            ));
        }

        match store.create_folder(&cwd, name, &self.owner) {
            Ok(_) => CommandOutcome::output(format!("Directory '{name}' created.")),
            Err(err) => CommandOutcome::error(format!(
                "mkdir: cannot create directory '{name}': {err}"
            )),
        }
    }
}
