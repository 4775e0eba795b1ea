//! Aggregate emulator package definitions into a single descriptor file.
//!
//! `extract` walks the package roots and writes `consoles.toml` (or
//! `cores.toml`), `check` re-reads that file and reports extensions or
//! folders claimed by more than one group.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use extract_cores::check::{check_document, render_report};
use extract_cores::core::aggregate::Groups;
use extract_cores::core::types::GroupBy;
use extract_cores::exit_codes;
use extract_cores::extract::extract_groups;
use extract_cores::io::config::{DEFAULT_CONFIG_PATH, load_config};
use extract_cores::io::store::{render_core_blocks, to_toml, write_groups};
use extract_cores::logging;
use tracing::debug;

const USAGE: &str = "Usage: extract-cores extract|check|cores";

#[derive(Parser)]
#[command(
    name = "extract-cores",
    version,
    about = "Aggregate emulator packages into consoles.toml / cores.toml"
)]
struct Cli {
    /// Tool configuration file (defaults apply when missing).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Walk package roots and write the aggregated document.
    Extract {
        #[arg(long, value_enum, default_value_t = GroupBy::Console)]
        group_by: GroupBy,
        /// Scan this root instead of the configured sources (repeatable).
        #[arg(long = "root")]
        roots: Vec<PathBuf>,
        /// Write here instead of the configured output path.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the document to stdout instead of writing a file.
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Report extensions and folders claimed by more than one group.
    Check {
        #[arg(long, value_enum, default_value_t = GroupBy::Console)]
        group_by: GroupBy,
        /// Document to check instead of the configured output path.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Exit with a distinct code when duplicates are found.
        #[arg(long)]
        strict: bool,
    },
    /// Print core groups as commented TOML blocks.
    Cores {
        /// Scan this root instead of the configured sources (repeatable).
        #[arg(long = "root")]
        roots: Vec<PathBuf>,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if prints_usage(err.kind()) => {
            debug!(error = %err, "unrecognized arguments");
            println!("{USAGE}");
            return Ok(exit_codes::OK);
        }
        Err(err) => err.exit(),
    };
    let Some(command) = cli.command else {
        println!("{USAGE}");
        return Ok(exit_codes::OK);
    };
    match command {
        Command::Extract {
            group_by,
            roots,
            output,
            stdout,
        } => cmd_extract(&cli.config, group_by, roots, output, stdout),
        Command::Check {
            group_by,
            input,
            strict,
        } => cmd_check(&cli.config, group_by, input, strict),
        Command::Cores { roots } => cmd_extract(&cli.config, GroupBy::Core, roots, None, true),
    }
}

/// Any argument error other than a help/version request falls back to usage.
fn prints_usage(kind: ErrorKind) -> bool {
    !matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

fn cmd_extract(
    config_path: &Path,
    group_by: GroupBy,
    roots: Vec<PathBuf>,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<i32> {
    let config = load_config(config_path)?.with_roots(roots);
    let rules = config.rules(group_by);
    let groups = extract_groups(&config.sources, &rules, |record| {
        if stdout {
            eprintln!("{}", record.group_key);
        } else {
            println!("{}", record.group_key);
        }
    })?;

    if stdout {
        let rendered = match &groups {
            Groups::Core(map) => render_core_blocks(map)?,
            Groups::Console(_) => to_toml(&groups)?,
        };
        print!("{rendered}");
        return Ok(exit_codes::OK);
    }

    let path = output.unwrap_or_else(|| config.output(group_by).to_path_buf());
    write_groups(&path, &groups)?;
    println!("Written to {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_check(
    config_path: &Path,
    group_by: GroupBy,
    input: Option<PathBuf>,
    strict: bool,
) -> Result<i32> {
    let path = match input {
        Some(path) => path,
        None => load_config(config_path)?.output(group_by).to_path_buf(),
    };
    let report = check_document(&path, group_by)?;
    if report.is_clean() {
        println!("No duplicates found in {}", path.display());
        return Ok(exit_codes::OK);
    }
    print!("{}", render_report(&report, group_by));
    Ok(if strict {
        exit_codes::DUPLICATES
    } else {
        exit_codes::OK
    })
}
