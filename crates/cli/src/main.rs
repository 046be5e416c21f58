use std::process::ExitCode;

use clap::Parser;

use askdata_cli::{run, Cli};
use askdata_configuration::environment::ProcessEnvironment;

#[tokio::main]
pub async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match run(cli, ProcessEnvironment, &mut stdout).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
