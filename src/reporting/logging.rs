use crate::config::Config;
use log::{debug, error, info, warn};
use std::path::PathBuf;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Console report is the normal output
    };

    // try_init: tests initialise the logger more than once, later calls are no-ops
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config, sources: &[PathBuf]) {
    for path in sources {
        debug!("Config source: {}", path.display());
    }
    info!(
        "Configuration: timeout={}s, default_subject={:?}",
        config.timeout_seconds(),
        config.default_subject()
    );
    info!(
        "Mail: from={}, to={}, password set={}",
        config.email.from.as_deref().unwrap_or("<unset>"),
        config.email.to.as_deref().unwrap_or("<unset>"),
        config.email.password.is_some()
    );
}

/// Log row source information
pub fn log_rows_loaded(source: &str, row_count: usize) {
    info!("Loaded {row_count} row(s) from {source}");
}

/// Log probe completion
pub fn log_probe_complete(row_count: usize, ok_count: usize, duration_ms: u128) {
    if ok_count == row_count {
        info!("Probe complete: {ok_count}/{row_count} URIs OK ({duration_ms}ms)");
    } else {
        warn!(
            "Probe complete: {ok_count}/{row_count} URIs OK, {} invalid ({duration_ms}ms)",
            row_count - ok_count
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
