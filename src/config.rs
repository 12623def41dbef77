use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::PackError;
use crate::level_source::LevelPack;

/// Terminal Sokoban that records every accepted move as a replayable claim.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Level pack in JSON form; the built-in pack is used when omitted
    #[arg(long, global = true)]
    pub levels: Option<PathBuf>,

    /// Zero-based index of the level to start on
    #[arg(long, default_value_t = 0, global = true)]
    pub level: usize,

    /// Append win claims to this file instead of printing them
    #[arg(long, global = true)]
    pub claims: Option<PathBuf>,

    /// Where logs go; interactive play needs the terminal for itself
    #[arg(long, default_value = "exports/sokoban.log", global = true)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Play interactively in the terminal
    Play,
    /// Print the starting position of the level
    Show,
    /// Replay a move list and report where it ends
    Replay {
        /// Action codes ("2,8,4,6") or LURD letters ("udlr")
        #[arg(long)]
        actions: String,
    },
    /// Exit with an error unless the move list solves the level
    Verify {
        #[arg(long)]
        actions: String,
    },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Play)
    }

    pub fn load_pack(&self) -> Result<LevelPack, PackError> {
        match &self.levels {
            Some(path) => LevelPack::from_path(path),
            None => LevelPack::builtin(),
        }
    }
}

/// Sends logs to `log_file`, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing(log_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = log_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = File::create(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| -> Box<dyn std::error::Error> { err })?;
    Ok(())
}
