// ============================================================================
// camcat-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialization for the CLI
//
// The core library only talks to the `log` facade. This module installs
// env_logger with a compact `<time> <LEVEL> <message>` format on stderr.
// The level comes from the number of `-v` flags unless RUST_LOG is set:
// - (none): info
// - -v: debug
// - -vv: trace

use log::LevelFilter;
use owo_colors::OwoColorize;
use std::io::Write;

/// Returns the current local time formatted as "HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Log level selected by `count` occurrences of `-v`.
pub fn level_for_verbosity(count: u8) -> LevelFilter {
    match count {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger. `color` styles the level tag.
pub fn init_logging(verbose: u8, color: bool) {
    let level = level_for_verbosity(verbose);

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .format(move |buf, record| {
            let tag = format!("{:<5}", record.level());
            let tag = if !color {
                tag
            } else {
                match record.level() {
                    log::Level::Error => tag.bright_red().to_string(),
                    log::Level::Warn => tag.yellow().to_string(),
                    log::Level::Info => tag.green().to_string(),
                    log::Level::Debug => tag.blue().to_string(),
                    log::Level::Trace => tag.magenta().to_string(),
                }
            };
            writeln!(buf, "{} {} {}", get_timestamp(), tag, record.args())
        })
        .init();

    log::debug!("Logger initialized with level: {}", level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Info);
        assert_eq!(level_for_verbosity(1), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(5), LevelFilter::Trace);
    }

    #[test]
    fn timestamp_is_clock_time() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.matches(':').count(), 2);
    }
}
