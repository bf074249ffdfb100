//! Structural diff and patch engine.
//!
//! Two independent halves:
//!
//! - [`diff::DiffComparator`] compares two instances of a type property by
//!   property, using per-property comparators from a
//!   [`property::ComparatorRegistry`].
//! - [`patch::Patch`] applies ordered [`patch::Delta`] edits to a sequence.

pub mod config;
pub mod diff;
pub mod err;
pub mod logging;
pub mod patch;
pub mod property;
pub mod util;

pub use diff::{DiffComparator, DiffEntry};
pub use err::{DiffError, Error, PatchError};
pub use patch::{Chunk, Delta, DeltaKind, Patch};
pub use property::{PropertyValue, Reflect};

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, LogConfig, init_config};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// The number of threads in parallel computing
    #[arg(short, long, default_value_t = 8)]
    threads: usize,

    /// Use verbose output (-vv very verbose, -vvv very verbose to file)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the line-level deltas between two text files
    Diff(DiffArgs),
    /// Apply the deltas to the old file to rebuild the new file
    Patch(RebuildArgs),
    /// Undo the deltas on the new file to rebuild the old file
    Restore(RebuildArgs),
}

#[derive(Debug, Args)]
struct DiffArgs {
    /// Path to old file
    old: String,
    /// Path to new file
    new: String,
}

#[derive(Debug, Args)]
struct RebuildArgs {
    /// Path to old file
    old: String,
    /// Path to new file
    new: String,
    /// Path to save the rebuilt file
    output: String,
}

// lines keep their terminators, so `\r\n` and a missing final newline survive
fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(String::from).collect()
}

fn read_lines(path: &str) -> Result<Vec<String>, Error> {
    let text = fs::read_to_string(PathBuf::from(path))
        .map_err(|e| Error::from_msg_io(&format!("cannot read {}", path), e))?;
    Ok(split_lines(&text))
}

fn write_lines(path: &str, lines: &[String]) -> Result<(), Error> {
    let write = || -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(PathBuf::from(path))?);
        for line in lines {
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()
    };
    write().map_err(|e| Error::from_msg_io(&format!("cannot write {}", path), e))
}

fn load_patch(old: &str, new: &str) -> Result<(Vec<String>, Vec<String>, Patch<String>), Error> {
    log::info!("reading old file...");
    let old = read_lines(old)?;
    log::info!("reading new file...");
    let new = read_lines(new)?;
    log::info!("comparing...");
    let patch = Patch::from_diff(&old, &new);
    Ok((old, new, patch))
}

fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Diff(args) => {
            let (_, _, patch) = load_patch(&args.old, &args.new)?;
            for delta in patch.deltas() {
                println!("{}", delta);
            }
        }
        Commands::Patch(args) => {
            let (old, _, patch) = load_patch(&args.old, &args.new)?;
            log::info!("patching...");
            let patched = patch.apply_to(&old)?;
            log::info!("writing patched file...");
            write_lines(&args.output, &patched)?;
        }
        Commands::Restore(args) => {
            let (_, new, patch) = load_patch(&args.old, &args.new)?;
            log::info!("restoring...");
            let restored = patch.restore(&new)?;
            log::info!("writing restored file...");
            write_lines(&args.output, &restored)?;
        }
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    init_config(Config {
        log_config: LogConfig::Verbose(cli.verbose),
        threads: cli.threads,
    });
    log::debug!("cli args: {:#?}", cli);
    match run(cli.command) {
        Ok(()) => {
            log::info!("success");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
