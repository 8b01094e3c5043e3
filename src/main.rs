use clap::Parser;
use stackguard::{Cli, Output};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose, cli.quiet);

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
