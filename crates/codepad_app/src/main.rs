mod app;
mod context;
mod effects;
mod logging;
mod snippets;
mod watcher;

use pad_logging::pad_error;

fn main() {
    logging::initialize(logging::LogDestination::Both);

    if let Err(err) = app::run_app() {
        pad_error!("codepad exited with error: {}", err);
        std::process::exit(1);
    }
}
