//! Entry point for the `roadie` binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use roadie_cli::CliError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match roadie_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => report(&err),
    }
}

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn report(err: &CliError) -> ExitCode {
    eprintln!("roadie: {err}");
    ExitCode::FAILURE
}
