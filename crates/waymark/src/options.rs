use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use waymark_common::{Error, Result};

/// Default location of the database configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/database.yml";

/// Parameters for one runner invocation.
///
/// The version is supplied programmatically by the embedding migration
/// unit; direction and config location come from the unit's command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Roll back this migration instead of applying it.
    pub rollback: bool,
    /// Location of the database configuration file.
    pub config: PathBuf,
    /// Version token of the migration unit.
    pub version: i64,
}

#[derive(Parser)]
#[command(name = "migration-unit", about = "Run one schema migration unit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply this unit's migration, or roll it back.
    Migrate(MigrateArgs),
}

#[derive(Args)]
struct MigrateArgs {
    /// Migrate one version behind instead of forward.
    #[arg(long)]
    rollback: bool,

    /// Path to the database configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

impl MigrationOptions {
    /// Options with defaults: forward direction, default config path.
    pub fn new(version: i64) -> Self {
        Self {
            rollback: false,
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            version,
        }
    }

    /// Parse options from the embedding unit's process arguments. Prints a
    /// usage message and exits on malformed arguments.
    pub fn from_env(version: i64) -> Self {
        Self::from_cli(Cli::parse(), version)
    }

    /// Parse options from an explicit argument list.
    pub fn from_args<I, T>(version: i64, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self::from_cli(cli, version))
    }

    fn from_cli(cli: Cli, version: i64) -> Self {
        let Command::Migrate(args) = cli.command;
        Self {
            rollback: args.rollback,
            config: args.config,
            version,
        }
    }
}

impl fmt::Display for MigrationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{rollback: {}, version: {}, config: {}}}",
            self.rollback,
            self.version,
            self.config.display()
        )
    }
}
