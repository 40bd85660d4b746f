mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod probe;
mod shape;

use std::process::ExitCode;

use error::AppResult;

fn main() -> AppResult<ExitCode> {
    entry::run()
}
