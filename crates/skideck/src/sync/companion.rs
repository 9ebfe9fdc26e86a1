use std::path::Path;
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::deck::panels::DeckMode;
use crate::error::{DeckError, Result};

/// Which of the two views this process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Role {
    /// The first view; opens the companion.
    #[default]
    Primary,
    /// Opened by the primary view; never opens another.
    Companion,
}

impl Role {
    /// The display mode a view takes when none is given explicitly.
    pub fn default_mode(&self) -> DeckMode {
        match self {
            Self::Primary => DeckMode::Presenter,
            Self::Companion => DeckMode::Local,
        }
    }
}

/// How the primary view opens its companion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CompanionMode {
    /// A second process talking over the channel directory.
    #[default]
    Process,
    /// A second window in this process.
    Window,
    /// No companion.
    None,
}

impl CompanionMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "process" => Some(Self::Process),
            "window" => Some(Self::Window),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Window => "window",
            Self::None => "none",
        }
    }
}

/// Arguments that start the companion view of a primary using `channel`.
pub fn companion_args(channel: &Path) -> Vec<String> {
    vec![
        "--role".to_string(),
        "companion".to_string(),
        "--companion".to_string(),
        "none".to_string(),
        "--channel".to_string(),
        channel.display().to_string(),
        "--windowed".to_string(),
    ]
}

/// A companion process this view started. Terminated when dropped.
#[derive(Debug)]
pub struct CompanionProcess {
    child: Option<Child>,
}

impl CompanionProcess {
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Kill and reap the process. Later calls do nothing.
    pub fn terminate(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        let pid = child.id();
        match child.try_wait() {
            Ok(Some(status)) => {
                info!(pid, %status, "companion view already exited");
                return;
            }
            Ok(None) => {}
            Err(e) => warn!(pid, "could not query companion view: {e}"),
        }
        if let Err(e) = child.kill() {
            warn!(pid, "failed to stop companion view: {e}");
        }
        match child.wait() {
            Ok(status) => info!(pid, %status, "companion view stopped"),
            Err(e) => warn!(pid, "failed to reap companion view: {e}"),
        }
    }
}

impl Drop for CompanionProcess {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Start `command` as a companion process owned by the caller.
pub fn spawn_process(mut command: Command) -> Result<CompanionProcess> {
    let child = command
        .stdin(Stdio::null())
        .spawn()
        .map_err(DeckError::Spawn)?;
    info!(pid = child.id(), "opened companion view");
    Ok(CompanionProcess { child: Some(child) })
}

/// Launch the companion as a new instance of this executable.
pub fn spawn_companion(channel: &Path) -> Result<CompanionProcess> {
    let exe = std::env::current_exe().map_err(DeckError::Spawn)?;
    let mut command = Command::new(&exe);
    command.args(companion_args(channel));
    spawn_process(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_companion_args_mark_role_and_channel() {
        let args = companion_args(&PathBuf::from("/tmp/deck-channel"));
        let joined = args.join(" ");
        assert!(joined.contains("--role companion"));
        assert!(joined.contains("--companion none"));
        assert!(joined.contains("--channel /tmp/deck-channel"));
    }

    #[test]
    fn test_default_modes() {
        assert_eq!(Role::Primary.default_mode(), DeckMode::Presenter);
        assert_eq!(Role::Companion.default_mode(), DeckMode::Local);
    }

    #[test]
    fn test_companion_mode_names() {
        assert_eq!(CompanionMode::from_name("window"), Some(CompanionMode::Window));
        assert_eq!(CompanionMode::from_name("none"), Some(CompanionMode::None));
        assert_eq!(CompanionMode::from_name("tab"), None);
        assert_eq!(CompanionMode::Process.name(), "process");
    }

    #[cfg(unix)]
    fn sleeper() -> Command {
        let mut command = Command::new("sleep");
        command.arg("30");
        command
    }

    #[cfg(unix)]
    #[test]
    fn test_terminate_stops_companion_process() {
        let mut process = spawn_process(sleeper()).unwrap();
        assert!(process.id().is_some());

        process.terminate();
        assert!(process.id().is_none());
        // Idempotent.
        process.terminate();
    }

    #[cfg(unix)]
    #[test]
    fn test_drop_reaps_companion_process() {
        let process = spawn_process(sleeper()).unwrap();
        let pid = process.id().unwrap();
        drop(process);

        // A reaped child no longer has a /proc entry.
        assert!(!Path::new(&format!("/proc/{pid}")).exists());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let result = spawn_process(Command::new("skideck-no-such-program"));
        assert!(matches!(result, Err(DeckError::Spawn(_))));
    }
}
