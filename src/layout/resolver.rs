//! Fill in a monitor spec's unspecified fields from the advertised modes
//! and confirm the result against the mode list.

use tracing::warn;

use crate::display::Mode;
use crate::layout::{ModeRef, MonitorSpec};

/// Refresh rates above this are excluded from automatic selection when the
/// low-performance cap is active. Exactly 60 Hz is allowed.
pub const LOW_PERFORMANCE_RATE: f64 = 60.0;

/// Complete `spec` against the modes advertised for its output.
///
/// Each step is skipped when the field was explicitly specified:
/// 1. width — the maximum width over all modes;
/// 2. height — the maximum height among modes of the resolved width;
/// 3. rate — the maximum derived rate among modes of the resolved
///    geometry, excluding rates above 60 Hz under `low_performance`;
/// 4. validation — the advertised mode whose derived rate rounds to the
///    resolved rate becomes the spec's mode reference.
///
/// When validation finds no mode, [`MonitorSpec::mode`] stays `None` — a
/// configuration error handled by the caller, not a fatal one.
pub fn resolve(spec: &mut MonitorSpec, modes: &[Mode], low_performance: bool) {
    if spec.xmode == 0 {
        spec.xmode = modes.iter().map(|m| m.width).max().unwrap_or(0);
    }

    if spec.ymode == 0 {
        spec.ymode = modes
            .iter()
            .filter(|m| m.width == spec.xmode)
            .map(|m| m.height)
            .max()
            .unwrap_or(0);
    }

    if spec.rate == 0.0 {
        spec.rate = modes
            .iter()
            .filter(|m| m.width == spec.xmode && m.height == spec.ymode)
            .map(Mode::rate)
            .filter(|&rate| !low_performance || rate <= LOW_PERFORMANCE_RATE)
            .fold(0.0, f64::max);
    }

    spec.mode = modes
        .iter()
        .filter(|m| m.width == spec.xmode && m.height == spec.ymode)
        .find(|m| m.rate().round() == spec.rate.round())
        .map(|m| ModeRef {
            width: m.width,
            height: m.height,
            rate: m.rate(),
        });

    if spec.mode.is_none() {
        warn!(
            id = %spec.id,
            xmode = spec.xmode,
            ymode = spec.ymode,
            rate = spec.rate,
            "no advertised mode matches the requested configuration"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A mode with timing chosen so the derived rate is exactly `rate`.
    fn mode(width: u32, height: u32, rate: u64) -> Mode {
        Mode {
            width,
            height,
            dot_clock: u64::from(width + 200) * u64::from(height + 100) * rate,
            h_total: width + 200,
            v_total: height + 100,
        }
    }

    fn spec() -> MonitorSpec {
        MonitorSpec::new("HDMI-1".to_string())
    }

    #[test]
    fn unspecified_fields_resolve_to_best_available() {
        let modes = vec![
            mode(1920, 1080, 60),
            mode(1920, 1080, 144),
            mode(1280, 720, 60),
        ];
        let mut s = spec();
        resolve(&mut s, &modes, false);
        assert_eq!((s.xmode, s.ymode), (1920, 1080));
        let resolved = s.mode.unwrap();
        assert_eq!((resolved.width, resolved.height), (1920, 1080));
        assert!((resolved.rate - 144.0).abs() < 1e-6);
    }

    #[test]
    fn low_performance_cap_excludes_rates_above_sixty() {
        let modes = vec![
            mode(1920, 1080, 60),
            mode(1920, 1080, 144),
            mode(1280, 720, 60),
        ];
        let mut s = spec();
        resolve(&mut s, &modes, true);
        let resolved = s.mode.unwrap();
        assert_eq!((resolved.width, resolved.height), (1920, 1080));
        assert!((resolved.rate - 60.0).abs() < 1e-6, "exactly 60 Hz is allowed");
    }

    #[test]
    fn height_is_maximised_at_the_resolved_width_only() {
        // 1280x1024 has the greater height, but width resolves to 1920 first.
        let modes = vec![mode(1920, 1080, 60), mode(1280, 1024, 60)];
        let mut s = spec();
        resolve(&mut s, &modes, false);
        assert_eq!((s.xmode, s.ymode), (1920, 1080));
    }

    #[test]
    fn explicit_fields_are_left_untouched() {
        let modes = vec![mode(1920, 1080, 144), mode(1280, 720, 60)];
        let mut s = spec();
        s.xmode = 1280;
        s.ymode = 720;
        resolve(&mut s, &modes, false);
        let resolved = s.mode.unwrap();
        assert_eq!((resolved.width, resolved.height), (1280, 720));
        assert!((resolved.rate - 60.0).abs() < 1e-6);
    }

    #[test]
    fn explicit_rate_bypasses_the_cap() {
        let modes = vec![mode(1920, 1080, 144)];
        let mut s = spec();
        s.rate = 144.0;
        resolve(&mut s, &modes, true);
        assert!(s.mode.is_some(), "the cap only constrains automatic selection");
    }

    #[test]
    fn validation_matches_by_rounded_rate() {
        // Real timing: 148.5 MHz / (2200 × 1125) = 60.0 Hz exactly;
        // a requested 59.95 rounds to 60 and matches.
        let real = Mode {
            width: 1920,
            height: 1080,
            dot_clock: 148_500_000,
            h_total: 2200,
            v_total: 1125,
        };
        let mut s = spec();
        s.rate = 59.95;
        resolve(&mut s, std::slice::from_ref(&real), false);
        assert!(s.mode.is_some());
    }

    #[test]
    fn unmatchable_request_leaves_mode_unset() {
        let modes = vec![mode(1920, 1080, 60)];
        let mut s = spec();
        s.xmode = 3840;
        s.ymode = 2160;
        resolve(&mut s, &modes, false);
        assert!(s.mode.is_none());
        // Partial resolution results stay recorded for diagnostics.
        assert_eq!((s.xmode, s.ymode), (3840, 2160));
    }

    #[test]
    fn empty_mode_list_resolves_nothing() {
        let mut s = spec();
        resolve(&mut s, &[], false);
        assert!(s.mode.is_none());
        assert_eq!((s.xmode, s.ymode), (0, 0));
    }
}
