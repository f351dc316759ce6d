//! geoshapes - Create, measure and store geometric shapes

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = geoshapes::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
