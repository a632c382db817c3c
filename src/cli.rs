use std::path::PathBuf;

use clap::Parser;

/// Command-line interface for the monitor setup tool.
///
/// With no flags, the first layout matching the connected monitors is
/// applied; `--select` prompts through the menu selector instead, and
/// `--auto` skips the configuration entirely.
#[derive(Parser, Debug)]
#[command(
    name = "xrandr-setup",
    about = "Configure multi-monitor layouts through XRandR",
    version = option_env!("XRANDR_SETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Ignore the configuration and auto-configure every connected monitor
    #[arg(short, long, conflicts_with = "select")]
    pub auto: bool,

    /// Choose the layout interactively; extra values are passed to the
    /// selector program verbatim
    #[arg(short, long, num_args = 0.., allow_hyphen_values = true, value_name = "SELECTOR_ARG")]
    pub select: Option<Vec<String>>,

    /// Cap automatic refresh-rate selection at 60 Hz
    #[arg(short, long)]
    pub low_performance: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Use this configuration file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
