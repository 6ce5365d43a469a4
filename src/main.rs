use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = bren::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => app::exit_code(&e),
    }
}
