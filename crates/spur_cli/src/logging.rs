//! Tracing subscriber setup.

use tracing::Level;

use crate::GlobalArgs;

/// Picks the log level from the global flags. `--quiet` wins over `--verbose`.
pub fn level(global: &GlobalArgs) -> Level {
    if global.quiet {
        Level::ERROR
    } else if global.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Installs a fmt subscriber writing to stderr.
pub fn init(global: &GlobalArgs) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level(global))
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .try_init();
}
