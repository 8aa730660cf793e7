//! `vidgrid [config.json]`

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = std::env::args_os().nth(1).map(PathBuf::from);
    let result = vidgrid::load_options(config.as_deref()).and_then(vidgrid::run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("vidgrid failed: {e}");
            ExitCode::FAILURE
        }
    }
}
