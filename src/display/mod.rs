//! Display-server collaborator boundary.
//!
//! The core treats the display server purely as a data source (outputs,
//! connection state, advertised modes, current screen size) and a sink
//! (per-output CRTC configuration, virtual screen size). Everything behind
//! [`DisplayServer`] is an explicitly-owned session object passed to the
//! code that needs it — there is no ambient global display handle.

pub mod xrandr;

use crate::error::DisplayError;
use crate::layout::MonitorSpec;

/// One advertised display mode.
///
/// The refresh rate is not stored; it is derived from the mode timings, the
/// same way the display server reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel clock in Hz.
    pub dot_clock: u64,
    /// Total horizontal timing including blanking.
    pub h_total: u32,
    /// Total vertical timing including blanking.
    pub v_total: u32,
}

impl Mode {
    /// Refresh rate in Hz: dot-clock / (h-total × v-total).
    ///
    /// Zero totals (degenerate timing data) yield `0.0` rather than a
    /// division error.
    #[must_use]
    pub fn rate(&self) -> f64 {
        let total = u64::from(self.h_total) * u64::from(self.v_total);
        if total == 0 {
            return 0.0;
        }
        self.dot_clock as f64 / total as f64
    }
}

/// One physical output as reported by the display server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Output identifier (e.g. `HDMI-1`).
    pub name: String,
    /// Whether a monitor is attached.
    pub connected: bool,
    /// Whether the display server currently designates this output primary.
    pub primary: bool,
    /// Reported physical width in millimeters (0 when unknown).
    pub mm_width: u32,
    /// Reported physical height in millimeters (0 when unknown).
    pub mm_height: u32,
    /// Modes advertised for this output.
    pub modes: Vec<Mode>,
}

impl Output {
    /// Test constructor: a connected output with the given modes.
    #[cfg(test)]
    pub(crate) fn connected_with_modes(name: &str, modes: Vec<Mode>) -> Self {
        Self {
            name: name.to_string(),
            connected: true,
            primary: false,
            mm_width: 0,
            mm_height: 0,
            modes,
        }
    }
}

/// Virtual screen dimensions: pixels plus physical millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
    pub mm_width: u32,
    pub mm_height: u32,
}

/// The display-server session.
///
/// One session is opened per invocation and owned by the command
/// orchestration; implementations hold whatever connection state they need
/// and release it on drop.
#[cfg_attr(test, mockall::automock)]
pub trait DisplayServer {
    /// Enumerate all outputs with connection state and advertised modes.
    fn outputs(&mut self) -> Result<Vec<Output>, DisplayError>;

    /// Read the current virtual screen size.
    fn screen_size(&mut self) -> Result<ScreenSize, DisplayError>;

    /// Apply a virtual screen size (pixel and physical).
    fn set_screen_size(&mut self, size: &ScreenSize) -> Result<(), DisplayError>;

    /// Apply one monitor's resolved mode, position, rotation, and primary
    /// designation.
    ///
    /// # Errors
    ///
    /// [`DisplayError::UnresolvedMode`] if the spec carries no resolved
    /// mode reference.
    fn apply_monitor(&mut self, spec: &MonitorSpec) -> Result<(), DisplayError>;
}
