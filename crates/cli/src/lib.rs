//! Command line driver for remesh-track.
//!
//! The binary runs the three pipeline stages separately or in one go:
//!
//! ```text
//! remesh-track parse <SIMULATION_DIR> [--out DIR]
//! remesh-track pcd <DIR>
//! remesh-track backtrack <DIR> [--until STEP]
//! remesh-track run <SIMULATION_DIR> [--out DIR] [--until STEP]
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use remesh_core::Step;
use remesh_io::Config;

pub use commands::{backtrack, metadata_dir, parse, pcd};

/// Backtrack accumulated strain through remeshed simulation steps.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML file with naming and report file settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split the report export into per-step tables
    Parse {
        /// Directory holding the report export
        simulation_dir: PathBuf,

        /// Output directory (defaults to `_metadata` beside the simulation directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Build one point cloud per step from the step tables
    Pcd {
        /// Directory holding the step tables
        dir: PathBuf,
    },

    /// Backtrack strain from the last step to the first
    Backtrack {
        /// Directory holding the point clouds
        dir: PathBuf,

        /// Stop once this step has been written
        #[arg(long, allow_negative_numbers = true)]
        until: Option<Step>,
    },

    /// Parse, build point clouds, and backtrack in one go
    Run {
        /// Directory holding the report export
        simulation_dir: PathBuf,

        /// Output directory (defaults to `_metadata` beside the simulation directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Stop once this step has been written
        #[arg(long, allow_negative_numbers = true)]
        until: Option<Step>,
    },
}

impl Cli {
    /// Loads the config file, or the defaults when none was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load(path).context("loading configuration"),
            None => Ok(Config::default()),
        }
    }
}

/// Runs the selected command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the command fails.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;

    match &cli.command {
        Command::Parse {
            simulation_dir,
            out,
        } => {
            parse(&config, simulation_dir, out.as_deref())?;
        }
        Command::Pcd { dir } => {
            pcd(&config, dir)?;
        }
        Command::Backtrack { dir, until } => {
            backtrack(&config, dir, *until)?;
        }
        Command::Run {
            simulation_dir,
            out,
            until,
        } => {
            let dir = parse(&config, simulation_dir, out.as_deref())?;
            pcd(&config, &dir)?;
            backtrack(&config, &dir, *until)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    #[test]
    fn parses_backtrack_with_negative_step() {
        let cli = Cli::try_parse_from(["remesh-track", "backtrack", "meta", "--until", "-15"])
            .expect("valid arguments");

        match cli.command {
            Command::Backtrack { dir, until } => {
                assert_eq!(dir, Path::new("meta"));
                assert_eq!(until, Some(Step::new(-15)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["remesh-track", "pcd", "meta", "-v", "--config", "r.toml"])
            .expect("valid arguments");

        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(Path::new("r.toml")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["remesh-track"]).is_err());
    }

    #[test]
    fn missing_config_file_fails() {
        let cli = Cli::try_parse_from(["remesh-track", "--config", "absent.toml", "pcd", "meta"])
            .expect("valid arguments");

        assert!(cli.load_config().is_err());
    }
}
