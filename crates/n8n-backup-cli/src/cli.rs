use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "n8n-backup",
    version,
    about = "Snapshot, prune and restore n8n workflows, credentials and data",
    after_help = "\
Running without a command creates a backup and then prunes old ones.

Configuration file lookup order:
  1. --config <path>                  (explicit flag)
  2. $N8N_BACKUP_CONFIG               (environment variable)
  3. ./n8n-backup.yaml                (project)
  4. ~/.config/n8n-backup/config.yaml (user, honours $XDG_CONFIG_HOME)
  5. /etc/n8n-backup/config.yaml      (system)
Built-in defaults apply when no file is found.

Environment variables:
  N8N_BACKUP_CONFIG   Path to configuration file (overrides default search)"
)]
pub(crate) struct Cli {
    /// Path to configuration file (overrides N8N_BACKUP_CONFIG and default search)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Capture the live directories into a new backup
    Backup {
        /// Store a plain directory even if compress_backups is set
        #[arg(long)]
        no_compress: bool,

        /// Skip the retention pass after the capture
        #[arg(long)]
        no_prune: bool,
    },

    /// List backups, newest first
    List {
        /// Show only the N most recent backups
        #[arg(long)]
        last: Option<usize>,
    },

    /// Overwrite the live directories from a backup
    Restore {
        /// Backup to restore from (name, archive file name, or "latest")
        snapshot: String,
    },

    /// Remove the oldest backups beyond the retention limit
    Prune {
        /// Number of backups to keep (overrides max_backups)
        #[arg(long)]
        keep: Option<usize>,

        /// Only show what would be removed, don't actually remove
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show the metadata recorded with a backup
    Info {
        /// Backup to inspect (name, archive file name, or "latest")
        snapshot: String,
    },

    /// Delete a single backup
    Delete {
        /// Backup name to delete
        snapshot: String,

        /// Only show what would be deleted, don't actually delete
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Generate a starter configuration file
    Config {
        /// Destination path (default: ./n8n-backup.yaml)
        #[arg(short, long)]
        dest: Option<String>,
    },
}

impl Commands {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Backup { .. } => "backup",
            Self::List { .. } => "list",
            Self::Restore { .. } => "restore",
            Self::Prune { .. } => "prune",
            Self::Info { .. } => "info",
            Self::Delete { .. } => "delete",
            Self::Config { .. } => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["n8n-backup"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn restore_requires_a_name() {
        assert!(Cli::try_parse_from(["n8n-backup", "restore"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["n8n-backup", "list", "-vv", "--config", "x.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some("x.yaml"));
        assert!(matches!(cli.command, Some(Commands::List { last: None })));
    }

    #[test]
    fn prune_flags() {
        let cli = Cli::try_parse_from(["n8n-backup", "prune", "--keep", "3", "-n"]).unwrap();
        match cli.command {
            Some(Commands::Prune { keep, dry_run }) => {
                assert_eq!(keep, Some(3));
                assert!(dry_run);
            }
            _ => panic!("expected prune"),
        }
    }

    #[test]
    fn command_names() {
        let cli = Cli::try_parse_from(["n8n-backup", "backup", "--no-prune"]).unwrap();
        assert_eq!(cli.command.unwrap().name(), "backup");
    }
}
