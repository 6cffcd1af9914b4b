//! Bouncing circles screensaver
//!
//! `circles <numCircles>`: coloured rings bouncing off the edges, 30 fps.

use std::process::ExitCode;

use pacsaver::cli::{self, CirclesArgs, Parsed};

fn main() -> ExitCode {
    let args = match cli::parse::<CirclesArgs, _, _>(std::env::args_os()) {
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
    log::info!("Circles starting with {} circles", args.num_circles);

    match cli::run_circles(&args) {
        Ok(report) => {
            // Terminal is restored by now
            eprintln!("circles: {} frames, seed {}", report.frames, report.seed);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("circles: {err}");
            ExitCode::FAILURE
        }
    }
}
