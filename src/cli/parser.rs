//! Command-line surface of raquetas-rs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::validation::{
    validate_config_file_path, validate_host_address, validate_port, validate_rollback_steps,
};
use crate::config::{Environment, StorageBackend};

#[derive(Parser, Debug)]
#[command(name = "raquetas-rs", version = crate::build::CLAP_LONG_VERSION)]
#[command(about = "Tennis racket catalogue REST service")]
#[command(after_long_help = "\
Running without a subcommand is the same as `serve`.

  raquetas-rs serve --host 0.0.0.0 --storage postgres
  raquetas-rs --config /etc/raquetas/production.toml serve --dry-run
  raquetas-rs migrate --rollback 1

Every configuration key can also be set as RAQUETAS_<SECTION>__<KEY>.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load this TOML file instead of the layered config/ directory
    #[arg(short, long, value_name = "FILE", value_parser = validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Which config/{ENV}.toml layer to apply [development, test, staging, production]
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<Environment>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Apply, preview or revert database migrations
    Migrate(MigrateArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeArgs {
    #[arg(long, value_name = "ADDRESS", value_parser = validate_host_address)]
    pub host: Option<String>,

    #[arg(short, long, value_parser = validate_port)]
    pub port: Option<u16>,

    /// Beats --verbose and --quiet
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// memory or postgres
    #[arg(long, value_name = "BACKEND")]
    pub storage: Option<StorageBackend>,

    /// Check the merged configuration and exit
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrateArgs {
    /// List pending migrations without applying them
    #[arg(long, conflicts_with = "rollback")]
    pub dry_run: bool,

    /// Revert the last STEPS migrations (1-100)
    #[arg(long, value_name = "STEPS", value_parser = validate_rollback_steps)]
    pub rollback: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Rejects combinations that slip past clap, e.g. a hand-built `Cli`.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("--verbose and --quiet are mutually exclusive".to_string());
        }
        match &self.command {
            Some(Commands::Migrate(MigrateArgs {
                dry_run: true,
                rollback: Some(_),
            })) => Err("--dry-run and --rollback are mutually exclusive".to_string()),
            _ => Ok(()),
        }
    }

    /// True unless the command is `migrate` or `serve --dry-run`.
    pub fn should_serve(&self) -> bool {
        match &self.command {
            None => true,
            Some(Commands::Serve(args)) => !args.dry_run,
            Some(Commands::Migrate(_)) => false,
        }
    }
}
