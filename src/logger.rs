//! Logger setup for the command-line binary.

/// Initializes `env_logger` for the process.
///
/// `--verbose` shows per-file debug output, `--debug` additionally shows trace output.
pub fn init_logger(verbose: bool, debug: bool) {
    let level = if debug {
        log::LevelFilter::Trace
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
