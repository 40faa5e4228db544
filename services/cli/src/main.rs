use std::process::ExitCode;

fn main() -> ExitCode {
    match zoo_welfare_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("application error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
