//! Shared helpers for integration tests: a recording display-server fake
//! and mode/output builders.
#![allow(dead_code)]

use xrandr_setup::display::{DisplayServer, Mode, Output, ScreenSize};
use xrandr_setup::error::DisplayError;
use xrandr_setup::layout::MonitorSpec;

/// One call made against the fake display server, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetScreenSize(ScreenSize),
    ApplyMonitor {
        id: String,
        mode: (u32, u32),
        /// Refresh rate rounded to whole Hz.
        rate: u32,
        pos: (u32, u32),
        rotation: &'static str,
        primary: bool,
    },
}

/// An in-memory display server that records every state-changing call.
pub struct FakeDisplay {
    pub outputs: Vec<Output>,
    pub screen: ScreenSize,
    pub calls: Vec<Call>,
}

impl FakeDisplay {
    pub fn new(outputs: Vec<Output>, screen: ScreenSize) -> Self {
        Self {
            outputs,
            screen,
            calls: Vec::new(),
        }
    }

    /// The recorded screen sizes, in call order.
    pub fn screen_sizes(&self) -> Vec<ScreenSize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetScreenSize(size) => Some(*size),
                Call::ApplyMonitor { .. } => None,
            })
            .collect()
    }

    /// The recorded monitor applications, in call order.
    pub fn applied(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::ApplyMonitor { .. }))
            .collect()
    }
}

impl DisplayServer for FakeDisplay {
    fn outputs(&mut self) -> Result<Vec<Output>, DisplayError> {
        Ok(self.outputs.clone())
    }

    fn screen_size(&mut self) -> Result<ScreenSize, DisplayError> {
        Ok(self.screen)
    }

    fn set_screen_size(&mut self, size: &ScreenSize) -> Result<(), DisplayError> {
        self.calls.push(Call::SetScreenSize(*size));
        Ok(())
    }

    fn apply_monitor(&mut self, spec: &MonitorSpec) -> Result<(), DisplayError> {
        let mode = spec
            .mode
            .as_ref()
            .ok_or_else(|| DisplayError::UnresolvedMode(spec.id.clone()))?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        self.calls.push(Call::ApplyMonitor {
            id: spec.id.clone(),
            mode: (mode.width, mode.height),
            rate: mode.rate.round() as u32,
            pos: (spec.xoffset, spec.yoffset),
            rotation: spec.rotation.as_str(),
            primary: spec.primary,
        });
        Ok(())
    }
}

/// A mode whose timing derives to exactly `rate` Hz.
pub fn mode(width: u32, height: u32, rate: u64) -> Mode {
    let h_total = width + 200;
    let v_total = height + 100;
    Mode {
        width,
        height,
        dot_clock: u64::from(h_total) * u64::from(v_total) * rate,
        h_total,
        v_total,
    }
}

/// A connected output advertising the given modes.
pub fn connected(name: &str, mm: (u32, u32), modes: Vec<Mode>) -> Output {
    Output {
        name: name.to_string(),
        connected: true,
        primary: false,
        mm_width: mm.0,
        mm_height: mm.1,
        modes,
    }
}

/// A disconnected output.
pub fn disconnected(name: &str) -> Output {
    Output {
        name: name.to_string(),
        connected: false,
        primary: false,
        mm_width: 0,
        mm_height: 0,
        modes: Vec::new(),
    }
}
