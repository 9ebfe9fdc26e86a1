use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::deck::panels::DeckMode;
use crate::sync::companion::{CompanionMode, Role};

#[derive(Parser)]
#[command(name = "skideck")]
#[command(author, version, about)]
#[command(long_about = "A keyboard-driven slide deck with a presenter and an audience view.\n\n\
    Navigating in either view moves the other one too.\n\n\
    Examples:\n  \
    skideck                        Present fullscreen and open the notes view\n  \
    skideck --windowed             Present in a window\n  \
    skideck --companion window     Open the notes view in this process\n  \
    skideck --mode local --no-sync Rehearse alone with notes\n  \
    skideck shortcuts              Print the keyboard shortcuts")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Which of the two views this process is
    #[arg(long, value_enum, default_value_t = Role::Primary)]
    pub role: Role,

    /// Presenter shows slides only; local adds notes and panels
    #[arg(long, value_enum)]
    pub mode: Option<DeckMode>,

    /// How the primary view opens its companion
    #[arg(long, value_enum)]
    pub companion: Option<CompanionMode>,

    /// Directory the views use to exchange state
    #[arg(long, value_name = "DIR")]
    pub channel: Option<PathBuf>,

    /// Do not synchronize with other views
    #[arg(long)]
    pub no_sync: bool,

    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long)]
    pub slide: Option<usize>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// List the slides in presentation order
    Slides,

    /// Print the keyboard shortcuts
    Shortcuts,

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.mode, sync.companion)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Slides) => {
                crate::commands::slides::run();
                Ok(())
            }
            Some(Commands::Shortcuts) => {
                crate::commands::shortcuts::run();
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                if self.slide == Some(0) {
                    anyhow::bail!("Slide numbers start at 1.");
                }
                crate::app::run(crate::app::LaunchOptions {
                    role: self.role,
                    mode: self.mode,
                    companion: self.companion,
                    channel: self.channel,
                    no_sync: self.no_sync,
                    windowed: self.windowed,
                    start_slide: self.slide,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_companion_invocation() {
        let cli = Cli::try_parse_from([
            "skideck",
            "--role",
            "companion",
            "--companion",
            "none",
            "--channel",
            "/tmp/ch",
            "--windowed",
        ])
        .unwrap();
        assert_eq!(cli.role, Role::Companion);
        assert_eq!(cli.companion, Some(CompanionMode::None));
        assert_eq!(cli.channel, Some(PathBuf::from("/tmp/ch")));
        assert!(cli.windowed);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_companion_args_parse_back() {
        let mut argv = vec!["skideck".to_string()];
        argv.extend(crate::sync::companion::companion_args(&PathBuf::from("/tmp/ch")));
        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.role, Role::Companion);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["skideck"]).unwrap();
        assert_eq!(cli.role, Role::Primary);
        assert!(cli.mode.is_none());
        assert!(!cli.no_sync);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_subcommand_conflicts_with_launch_args() {
        assert!(Cli::try_parse_from(["skideck", "--windowed", "slides"]).is_err());
    }
}
