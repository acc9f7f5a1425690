use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use hlx_server::logging;
use hlx_server::Simulator;

/// HLX head simulator
///
/// Serves the HLX control protocol over telnet, impersonating a physical
/// whole-house audio head for client development and testing.
#[derive(Parser, Debug)]
#[command(name = "hlxsimd")]
#[command(about = "HLX whole-house audio head simulator")]
#[command(version)]
pub struct Args {
    /// URL to listen on
    #[arg(short, long, default_value = "telnet://0.0.0.0:23")]
    pub url: String,

    /// Configuration backup file; loaded on start when present, written by
    /// the SAVE command
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_logging_from_env() {
        eprintln!("hlxsimd: {e}");
        return ExitCode::FAILURE;
    }

    let simulator = match Simulator::new(args.config) {
        Ok(simulator) => simulator,
        Err(e) => {
            error!(error = %e, "simulator initialization failed");
            return ExitCode::FAILURE;
        }
    };

    match simulator.run(&args.url).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "simulator exited with error");
            ExitCode::FAILURE
        }
    }
}
