use clap::Parser;
use piecewise::cli::{self, Cli};
use piecewise::{ConsoleProgress, ProgressSink, TracingProgress};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Usage errors exit with 2 from inside clap
    let cli = Cli::parse();

    cli::guard(move || {
        // Keep stdout clean for the JSON document
        let mut console = ConsoleProgress;
        let mut tracing_sink = TracingProgress;
        let progress: &mut dyn ProgressSink = if cli.command.wants_json() {
            &mut tracing_sink
        } else {
            &mut console
        };

        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        cli::run(&cli, progress, &mut out)
    })
    .into()
}
