//! The one command: pick a layout and push it to the display server.
//!
//! The full sequence is query, load, match, select, resolve, rotate, grow
//! the screen, configure each output, then retract the screen to the exact
//! layout size. The two-phase screen sizing keeps the virtual screen large
//! enough for both the old and new configurations while outputs move.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::config::Config;
use crate::display::{DisplayServer, Output, xrandr::XrandrSession};
use crate::error::{ConfigError, DisplayError, SetupError};
use crate::layout::{MonitorLayout, geometry, matcher, resolver};
use crate::prompt;

/// Run the command against a fresh display-server session.
///
/// # Errors
///
/// Fails when the display server is unavailable, a display command fails,
/// the config file exists but cannot be read, or the menu selector cannot
/// be spawned.
pub fn run(cli: &Cli) -> Result<()> {
    let mut session = XrandrSession::open().map_err(SetupError::from)?;
    run_with(cli, &mut session)
}

/// Run the command against the given session.
pub fn run_with(cli: &Cli, session: &mut impl DisplayServer) -> Result<()> {
    let outputs = session.outputs().map_err(SetupError::from)?;
    let connected: Vec<Output> = outputs.into_iter().filter(|o| o.connected).collect();
    if connected.is_empty() {
        info!("no connected outputs, nothing to configure");
        return Ok(());
    }
    debug!(
        connected = ?connected.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
        "queried display server"
    );

    let candidates = load_candidates(cli, &connected)?;

    let selected = if cli.auto {
        None
    } else if let Some(selector_args) = &cli.select {
        // Nothing to choose from is not a cancellation: the auto layout
        // applies, the same as on the non-interactive path.
        if candidates.is_empty() {
            None
        } else {
            match prompt::select(&candidates, selector_args).map_err(SetupError::from)? {
                None => {
                    info!("selection cancelled");
                    return Ok(());
                }
                Some(index) => {
                    let choice = candidates.get(index).cloned();
                    if choice.is_none() {
                        warn!(index, "selector returned an out-of-range entry");
                    }
                    choice
                }
            }
        }
    } else {
        candidates.first().cloned()
    };

    let mut layout = selected.unwrap_or_else(|| MonitorLayout::auto(&connected));
    info!(layout = layout.label(), "configuring layout");

    let low_performance = cli.low_performance || layout.low_performance;
    if !resolve_layout(&mut layout, &connected, low_performance) {
        warn!(
            layout = layout.label(),
            "layout cannot be realised on the connected hardware, loading default"
        );
        layout = MonitorLayout::auto(&connected);
        resolve_layout(&mut layout, &connected, cli.low_performance);
    }

    geometry::apply_rotation(&mut layout);
    apply(&layout, session).map_err(SetupError::from)?;
    info!(layout = layout.label(), "layout applied");
    Ok(())
}

/// Load the configured layouts and keep those matching the connected
/// outputs.
///
/// A missing or malformed config file degrades to an empty candidate set
/// (the auto layout then applies); only an unreadable file or an
/// undeterminable path is fatal.
fn load_candidates(cli: &Cli, connected: &[Output]) -> Result<Vec<MonitorLayout>> {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err @ ConfigError::Io { .. }) => return Err(SetupError::from(err).into()),
        Err(err) => {
            warn!("ignoring configuration: {err}");
            Config::default()
        }
    };

    let mut candidates = config.layouts;
    let connected_names: Vec<String> = connected.iter().map(|o| o.name.clone()).collect();
    matcher::retain_matching(&mut candidates, &connected_names);
    debug!(count = candidates.len(), "candidate layouts after matching");
    Ok(candidates)
}

/// Resolve every spec in the layout against its output's advertised modes.
/// Returns whether all specs found a usable mode.
fn resolve_layout(
    layout: &mut MonitorLayout,
    connected: &[Output],
    low_performance: bool,
) -> bool {
    for spec in &mut layout.monitors {
        let modes = connected
            .iter()
            .find(|o| o.name == spec.id)
            .map_or(&[][..], |o| o.modes.as_slice());
        resolver::resolve(spec, modes, low_performance);
    }
    layout.monitors.iter().all(|spec| spec.mode.is_some())
}

/// Push the resolved layout: grow the screen, configure each output, then
/// retract the screen to the exact layout size.
fn apply(layout: &MonitorLayout, session: &mut impl DisplayServer) -> Result<(), DisplayError> {
    let current = session.screen_size()?;
    let grown = geometry::screen_size(layout, &current, false);
    session.set_screen_size(&grown)?;

    for spec in &layout.monitors {
        if spec.mode.is_none() {
            // Unrealisable even in the fallback layout (an output with no
            // advertised modes); leave it untouched.
            warn!(id = %spec.id, "skipping output with no usable mode");
            continue;
        }
        session.apply_monitor(spec)?;
    }

    let fitted = geometry::screen_size(layout, &current, true);
    session.set_screen_size(&fitted)
}
