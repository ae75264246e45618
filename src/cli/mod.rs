//! Command-line surface of `piecewise`.
//!
//! ```text
//! piecewise split video.mp4 20M          # video.000.mp4, video.001.mp4, ...
//! piecewise split video.mp4 20M --dry-run
//! piecewise split video.mp4 20M --json   # machine-readable report on stdout
//! piecewise join video.mp4               # rebuild video.mp4 from its pieces
//! piecewise join video.mp4 -o copy.mp4 --force
//! ```

use crate::config::Settings;
use crate::exit::ExitStatus;
use crate::joiner::PieceJoiner;
use crate::size::format_byte_count;
use crate::splitter::{FileSplitter, ProgressSink, SplitRequest};
use crate::telemetry;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::panic::{self, UnwindSafe};
use std::path::PathBuf;
use tracing::debug;


#[derive(Parser, Debug)]
#[command(
    name = "piecewise",
    version,
    about = "Split a file into fixed-size pieces and join them back"
)]
pub struct Cli {
    /// Path to a JSON settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set (overrides the settings file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split SOURCE into pieces of at most MAX_SIZE bytes
    Split {
        /// File to split; pieces are written next to it
        source: PathBuf,

        /// Maximum piece size: digits with an optional K, M or G suffix
        max_size: String,

        /// Print the pieces that would be written without writing them
        #[arg(long)]
        dry_run: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rebuild SOURCE by concatenating its pieces in order
    Join {
        /// Original file name the pieces were split from
        source: PathBuf,

        /// Where to write the rebuilt file (defaults to SOURCE)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output if it already exists
        #[arg(long)]
        force: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Whether stdout is reserved for a JSON document
    pub fn wants_json(&self) -> bool {
        match self {
            Commands::Split { json, .. } | Commands::Join { json, .. } => *json,
        }
    }
}

/// Load settings, start logging and run the parsed command line
///
/// Anything [`execute`] does not classify itself (an unreadable or
/// invalid settings file, a failing stdout) is printed and reported as
/// [`ExitStatus::UnhandledException`].
pub fn run(cli: &Cli, progress: &mut dyn ProgressSink, out: &mut dyn Write) -> ExitStatus {
    let result = Settings::load(cli.config.as_deref()).and_then(|settings| {
        let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
        telemetry::init(level);
        execute(&cli.command, &settings, progress, out)
    });

    match result {
        Ok(status) => status,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitStatus::UnhandledException
        }
    }
}

/// Call `f`, mapping a panic to [`ExitStatus::UnhandledException`]
///
/// The panic hook has already printed the message by the time this returns.
pub fn guard<F>(f: F) -> ExitStatus
where
    F: FnOnce() -> ExitStatus + UnwindSafe,
{
    panic::catch_unwind(f).unwrap_or(ExitStatus::UnhandledException)
}

/// Run one command and translate its outcome into an exit status
///
/// Classified failures are printed to stderr and returned as their exit
/// status. An `Err` means something outside that classification went
/// wrong (for example stdout closing), which the binary reports as
/// [`ExitStatus::UnhandledException`].
pub fn execute(
    command: &Commands,
    settings: &Settings,
    progress: &mut dyn ProgressSink,
    out: &mut dyn Write,
) -> Result<ExitStatus> {
    match command {
        Commands::Split {
            source,
            max_size,
            dry_run,
            json,
        } => {
            let splitter = FileSplitter::with_settings(settings);
            let request = SplitRequest::new(source.clone(), max_size.clone());

            if *dry_run {
                let plan = match splitter.plan(&request) {
                    Ok(plan) => plan,
                    Err(err) => {
                        let status = err.exit_status();
                        return Ok(report_failure(err, status));
                    }
                };

                if *json {
                    serde_json::to_writer_pretty(&mut *out, &plan)?;
                    writeln!(out)?;
                } else {
                    for piece in &plan.pieces {
                        writeln!(out, "{}\t{} bytes", piece.path.display(), piece.len)?;
                    }
                    writeln!(out, "{} piece(s) planned", plan.pieces.len())?;
                }
                return Ok(ExitStatus::Success);
            }

            match splitter.split(request, progress) {
                Ok(report) => {
                    if *json {
                        serde_json::to_writer_pretty(&mut *out, &report)?;
                        writeln!(out)?;
                    } else {
                        writeln!(
                            out,
                            "Wrote {} piece(s) of at most {} bytes from {}",
                            report.piece_count(),
                            format_byte_count(report.max_bytes),
                            report.source.display()
                        )?;
                        if report.stale_removed > 0 {
                            writeln!(
                                out,
                                "Removed {} leftover piece(s) from an earlier split",
                                report.stale_removed
                            )?;
                        }
                    }
                    Ok(ExitStatus::Success)
                }
                Err(err) => {
                    let status = err.exit_status();
                    Ok(report_failure(err, status))
                }
            }
        }

        Commands::Join {
            source,
            output,
            force,
            json,
        } => {
            let output = output.as_ref().unwrap_or(source);
            let joiner = PieceJoiner::with_settings(settings).overwrite(*force);

            match joiner.join(source, output, progress) {
                Ok(report) => {
                    if *json {
                        serde_json::to_writer_pretty(&mut *out, &report)?;
                        writeln!(out)?;
                    } else {
                        writeln!(
                            out,
                            "Joined {} piece(s) ({} bytes) into {}",
                            report.piece_count,
                            report.total_bytes,
                            report.output.display()
                        )?;
                    }
                    Ok(ExitStatus::Success)
                }
                Err(err) => {
                    let status = err.exit_status();
                    Ok(report_failure(err, status))
                }
            }
        }
    }
}

fn report_failure<E>(err: E, status: ExitStatus) -> ExitStatus
where
    E: std::error::Error + Send + Sync + 'static,
{
    let err = anyhow::Error::new(err);
    debug!(code = status.code(), "command failed: {:?}", err);
    eprintln!("error: {:#}", err);
    status
}
