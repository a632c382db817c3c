//! Domain records for selectable multi-monitor layouts, and the algorithms
//! that complete them: matching against connected hardware, mode
//! resolution, and screen-geometry aggregation.

pub mod geometry;
pub mod matcher;
pub mod resolver;

use crate::display::Output;

/// One named, selectable multi-monitor configuration (a `[[screen]]` in the
/// config grammar).
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorLayout {
    /// Display name shown in the selection menu.
    pub name: Option<String>,
    /// Target DPI for the physical-size computation; `0` derives it from
    /// the display server's current sizes.
    pub dpi: u32,
    /// Cap automatic refresh-rate selection at 60 Hz for this layout.
    pub low_performance: bool,
    /// Monitor entries, in config order.
    pub monitors: Vec<MonitorSpec>,
}

impl MonitorLayout {
    /// The fallback layout: one unspecified monitor per connected output.
    ///
    /// Used when no configured layout matches the connected hardware, when
    /// `--auto` is given, or when a selected layout fails mode resolution.
    #[must_use]
    pub fn auto(connected: &[Output]) -> Self {
        Self {
            name: Some("auto".to_string()),
            dpi: 0,
            low_performance: false,
            monitors: connected
                .iter()
                .map(|o| MonitorSpec::new(o.name.clone()))
                .collect(),
        }
    }

    /// The menu label for this layout.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

/// One physical-output entry within a layout.
///
/// Zero-valued geometry/timing fields mean "unspecified, auto-fill"; the
/// mode resolver replaces them with the best advertised values and records
/// the confirmed mode in [`MonitorSpec::mode`].
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSpec {
    /// Output identifier (e.g. `HDMI-1`). Mandatory and non-empty.
    pub id: String,
    /// Horizontal position of the top-left corner in the virtual screen.
    pub xoffset: u32,
    /// Vertical position of the top-left corner in the virtual screen.
    pub yoffset: u32,
    /// Requested width in pixels; `0` auto-fills.
    pub xmode: u32,
    /// Requested height in pixels; `0` auto-fills.
    pub ymode: u32,
    /// Requested refresh rate in Hz; `0.0` auto-fills.
    pub rate: f64,
    /// Output rotation.
    pub rotation: Rotation,
    /// Whether this output becomes the primary output.
    pub primary: bool,
    /// The advertised mode confirmed for this spec; `None` until resolution
    /// succeeds.
    pub mode: Option<ModeRef>,
    /// Whether the sideways-rotation dimension swap has been applied.
    /// Guards against swapping twice.
    pub(crate) rotated: bool,
}

impl MonitorSpec {
    /// A spec for `id` with every other field unspecified.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self {
            id,
            xoffset: 0,
            yoffset: 0,
            xmode: 0,
            ymode: 0,
            rate: 0.0,
            rotation: Rotation::Normal,
            primary: false,
            mode: None,
            rotated: false,
        }
    }
}

/// A concrete (width, height, refresh-rate) triple confirmed to be offered
/// by the physical output.
///
/// Dimensions are in the output's native orientation, independent of any
/// rotation swap applied to the owning spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeRef {
    pub width: u32,
    pub height: u32,
    pub rate: f64,
}

/// Output rotation, as named in the config grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Normal,
    Inverted,
    Left,
    Right,
}

impl Rotation {
    /// Parse a config rotation value. Unknown names are `None` (the field
    /// then degrades to [`Rotation::Normal`]).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "normal" => Some(Self::Normal),
            "inverted" => Some(Self::Inverted),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Whether this rotation swaps the output's width and height.
    #[must_use]
    pub const fn is_sideways(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The config/xrandr name of this rotation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Inverted => "inverted",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}
