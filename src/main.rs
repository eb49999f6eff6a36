use std::process::ExitCode;

fn main() -> ExitCode {
    // Malformed input lines are reported at `warn`, so that is the floor.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match gd_line::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
