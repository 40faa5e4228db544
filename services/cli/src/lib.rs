mod cli;
mod commands;
mod infra;

use zoo_welfare::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
