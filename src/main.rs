// src/main.rs

use std::process::ExitCode;

use formctx::{cli, logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level, args.debug) {
        eprintln!("formctx error: {err:?}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("formctx error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
