use std::process::ExitCode;
use suite_graph::cli;

fn main() -> ExitCode {
    // Parse command line arguments and process the command
    match cli::run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
