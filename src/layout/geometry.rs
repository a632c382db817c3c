//! Virtual screen geometry: rotation swap and pixel/millimeter sizing.

use crate::display::ScreenSize;
use crate::layout::MonitorLayout;

/// Millimeters per inch, for the DPI conversion.
const MM_PER_INCH: f64 = 25.4;

/// Fallback DPI when the display server reports no usable physical size.
const DEFAULT_DPI: f64 = 96.0;

/// Swap width and height for every sideways-rotated spec that has not been
/// swapped yet. Runs after mode resolution (modes are matched in native
/// orientation) and before [`screen_size`]; the per-spec flag guarantees a
/// spec is never swapped twice.
pub fn apply_rotation(layout: &mut MonitorLayout) {
    for spec in &mut layout.monitors {
        if spec.rotation.is_sideways() && !spec.rotated {
            std::mem::swap(&mut spec.xmode, &mut spec.ymode);
            spec.rotated = true;
        }
    }
}

/// Compute the virtual screen size for the layout.
///
/// The pixel size is the maximum of offset + dimension over all specs in
/// each axis; the millimeter size follows from the target DPI via
/// `mm = 25.4 × px / dpi`. The DPI is the layout's explicit `dpi` key when
/// set, else derived from the display server's current pixel and physical
/// heights.
///
/// A non-retracting pass never reports a size smaller than `current` (the
/// display server's size while the monitors are being reconfigured); the
/// retracting pass shrinks to exactly fit the layout.
#[must_use]
pub fn screen_size(layout: &MonitorLayout, current: &ScreenSize, retract: bool) -> ScreenSize {
    let mut width = 0u32;
    let mut height = 0u32;
    for spec in &layout.monitors {
        // Offsets up to u32::MAX pass the value grammar; saturate rather
        // than overflow the union.
        width = width.max(spec.xoffset.saturating_add(spec.xmode));
        height = height.max(spec.yoffset.saturating_add(spec.ymode));
    }

    let dpi = target_dpi(layout, current);
    let mut mm_width = to_mm(width, dpi);
    let mut mm_height = to_mm(height, dpi);

    if !retract {
        if current.width > width {
            width = current.width;
            mm_width = current.mm_width;
        }
        if current.height > height {
            height = current.height;
            mm_height = current.mm_height;
        }
    }

    ScreenSize {
        width,
        height,
        mm_width,
        mm_height,
    }
}

/// The DPI used for millimeter sizing: the explicit `dpi` key, else the
/// display server's current vertical DPI, else a 96 DPI fallback.
fn target_dpi(layout: &MonitorLayout, current: &ScreenSize) -> f64 {
    if layout.dpi > 0 {
        return f64::from(layout.dpi);
    }
    if current.mm_height > 0 {
        return MM_PER_INCH * f64::from(current.height) / f64::from(current.mm_height);
    }
    DEFAULT_DPI
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_mm(pixels: u32, dpi: f64) -> u32 {
    (MM_PER_INCH * f64::from(pixels) / dpi) as u32
}
