use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod catalog;
mod command;
mod interactive;
mod session;
mod spinner;
mod wrap;


use command::Mode;
use session::{Config, Outcome, Session};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    init_tracing(args.iter().any(|arg| arg == "--verbose"));

    let mut session = Session::new(Config::default());
    let status = match session.run(&args, Mode::Batch) {
        Outcome::EnterInteractive => interactive::run(&mut session),
        Outcome::Quit => 0,
        Outcome::Status(status) => status,
    };
    if status == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
