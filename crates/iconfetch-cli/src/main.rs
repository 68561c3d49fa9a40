use iconfetch_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // File logging first; stderr if the state dir is unusable.
    if let Err(file_err) = logging::init_logging() {
        if let Err(err) = logging::init_logging_stderr() {
            eprintln!("iconfetch: logging disabled ({:#}; {:#})", file_err, err);
        }
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("iconfetch error: {:#}", err);
        std::process::exit(1);
    }
}
