//! Discard candidate layouts that cannot correspond to the connected
//! hardware.

use std::collections::HashSet;

use crate::layout::MonitorLayout;

/// Keep only layouts whose monitor-identifier set exactly equals the
/// connected-output set: same cardinality, no duplicate spec ids, no
/// leftovers on either side.
///
/// Removal preserves the relative order of surviving layouts. An empty
/// result is not an error; the caller falls back to the auto layout.
pub fn retain_matching(layouts: &mut Vec<MonitorLayout>, connected: &[String]) {
    let want: HashSet<&str> = connected.iter().map(String::as_str).collect();
    layouts.retain(|layout| {
        if layout.monitors.len() != want.len() {
            return false;
        }
        let mut seen = HashSet::with_capacity(want.len());
        layout
            .monitors
            .iter()
            .all(|m| want.contains(m.id.as_str()) && seen.insert(m.id.as_str()))
    });
}
