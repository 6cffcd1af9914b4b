//! Pacsaver entry point
//!
//! `pacsaver <numPredators> <numPrey>`: predators hide the prey they touch.

use std::process::ExitCode;

use pacsaver::cli::{self, PacArgs, Parsed};

fn main() -> ExitCode {
    let args = match cli::parse::<PacArgs, _, _>(std::env::args_os()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Info(text)) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprint!("{err}");
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.common.default_log_filter()))
        .init();
    log::info!("Pacsaver starting: {} predators, {} prey", args.num_predators, args.num_prey);

    match cli::run_pac(&args) {
        Ok(report) => {
            // Terminal is restored by now
            eprintln!("pacsaver: {} frames, seed {}", report.frames, report.seed);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("pacsaver: {err}");
            ExitCode::FAILURE
        }
    }
}
