use clap::Parser;
use code_count_cli::args::Args;
use code_count_cli::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init(&args.behavior) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match code_count_cli::execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Application Error: {e}");
            ExitCode::FAILURE
        }
    }
}
