//! Tracing setup: console output on stderr plus a persistent log file.
//!
//! The console layer follows the requested verbosity (`RUST_LOG` wins when
//! set); the file layer always captures `DEBUG` and above so a quiet run
//! still leaves a usable trace in the cache directory.

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, Layer as _, fmt};

/// Install the global tracing subscriber.
///
/// Logging must never abort the program: an unopenable log file just drops
/// the file layer, and a second initialisation is ignored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xrandr_setup={default_level}")));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(filter);

    let file = open_log_file().map(|file| {
        fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_filter(LevelFilter::DEBUG)
    });

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init();
}

/// Open the log file in append mode and write a run header. `None` when
/// the cache directory cannot be prepared.
fn open_log_file() -> Option<fs::File> {
    let path = log_file_path()?;
    fs::create_dir_all(path.parent()?).ok()?;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    let version = option_env!("XRANDR_SETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    writeln!(file, "---- xrandr-setup {version} ----").ok()?;
    Some(file)
}

/// `$XDG_CACHE_HOME/xrandr-setup/xrandr-setup.log`, with `$HOME/.cache`
/// standing in when `XDG_CACHE_HOME` is unset.
fn log_file_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    Some(base.join("xrandr-setup").join("xrandr-setup.log"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn log_path_ends_with_the_app_log_file() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("xrandr-setup/xrandr-setup.log"));
        }
    }

    #[test]
    fn repeated_init_is_harmless() {
        init(false);
        init(true);
    }
}
