//! Extraction of layout domain records from the parsed scope tree.
//!
//! Typing is forgiving by policy: a key whose value fails its grammar is
//! logged and treated as unspecified, and a missing key always means "use
//! the default". Only structural parse failures (handled upstream) abort.

use tracing::warn;

use crate::config::scope::{ScopeId, ScopeTree};
use crate::config::value;
use crate::layout::{MonitorLayout, MonitorSpec, Rotation};

/// Build the full layout set from a parsed config tree.
///
/// Reads the root `screen` series; each screen contributes one
/// [`MonitorLayout`] with its nested `monitor` sections. A tree without a
/// `screen` series yields an empty set (caller falls back to auto).
#[must_use]
pub fn from_tree(tree: &ScopeTree) -> Vec<MonitorLayout> {
    let Some(screens) = tree.lookup_child_series(tree.root(), "screen") else {
        return Vec::new();
    };
    screens.iter().map(|&node| screen(tree, node)).collect()
}

fn screen(tree: &ScopeTree, node: ScopeId) -> MonitorLayout {
    let monitors = tree
        .lookup_child_series(node, "monitor")
        .unwrap_or(&[])
        .iter()
        .filter_map(|&m| monitor(tree, m))
        .collect();

    MonitorLayout {
        name: get_string(tree, node, "name"),
        dpi: get_uint(tree, node, "dpi").unwrap_or(0),
        low_performance: get_bool(tree, node, "low-performance").unwrap_or(false),
        monitors,
    }
}

fn monitor(tree: &ScopeTree, node: ScopeId) -> Option<MonitorSpec> {
    let Some(id) = get_string(tree, node, "id").filter(|id| !id.is_empty()) else {
        warn!("monitor section without a usable 'id' key, skipping");
        return None;
    };

    let mut spec = MonitorSpec::new(id);
    spec.primary = get_bool(tree, node, "primary").unwrap_or(false);
    spec.xoffset = get_uint(tree, node, "xoffset").unwrap_or(0);
    spec.yoffset = get_uint(tree, node, "yoffset").unwrap_or(0);
    spec.xmode = get_uint(tree, node, "xmode").unwrap_or(0);
    spec.ymode = get_uint(tree, node, "ymode").unwrap_or(0);
    spec.rate = get_double(tree, node, "rate").unwrap_or(0.0);
    spec.rotation = get_string(tree, node, "rotation")
        .and_then(|raw| {
            let rotation = Rotation::parse(&raw);
            if rotation.is_none() {
                warn!(value = %raw, "unknown rotation, using normal");
            }
            rotation
        })
        .unwrap_or_default();
    Some(spec)
}

fn get_string(tree: &ScopeTree, node: ScopeId, key: &str) -> Option<String> {
    let raw = tree.get(node, key)?;
    match value::parse_string(raw) {
        Ok(s) => Some(s.to_string()),
        Err(err) => {
            warn!(key, %err, "ignoring mistyped value");
            None
        }
    }
}

fn get_uint(tree: &ScopeTree, node: ScopeId, key: &str) -> Option<u32> {
    let raw = tree.get(node, key)?;
    match value::parse_uint(raw) {
        Ok(v) => Some(v),
        Err(err) => {
            warn!(key, %err, "ignoring mistyped value");
            None
        }
    }
}

fn get_bool(tree: &ScopeTree, node: ScopeId, key: &str) -> Option<bool> {
    let raw = tree.get(node, key)?;
    match value::parse_bool(raw) {
        Ok(v) => Some(v),
        Err(err) => {
            warn!(key, %err, "ignoring mistyped value");
            None
        }
    }
}

fn get_double(tree: &ScopeTree, node: ScopeId, key: &str) -> Option<f64> {
    let raw = tree.get(node, key)?;
    match value::parse_double(raw) {
        Ok(v) => Some(v),
        Err(err) => {
            warn!(key, %err, "ignoring mistyped value");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::parser::parse_str;

    fn layouts(input: &str) -> Vec<MonitorLayout> {
        from_tree(&parse_str(input).unwrap())
    }

    #[test]
    fn tree_without_screens_yields_empty_set() {
        assert!(layouts("").is_empty());
        assert!(layouts("dpi=96\n").is_empty());
    }

    #[test]
    fn full_screen_section_maps_to_domain_record() {
        let got = layouts(
            "[[screen]]\nname=\"docked\"\ndpi=144\nlow-performance=true\n\
             [[monitor]]\nid=\"HDMI-1\"\nprimary=true\nxoffset=1920\nyoffset=0\n\
             xmode=2560\nymode=1440\nrate=59.95\nrotation=\"left\"\n",
        );
        assert_eq!(got.len(), 1);
        let layout = &got[0];
        assert_eq!(layout.name.as_deref(), Some("docked"));
        assert_eq!(layout.dpi, 144);
        assert!(layout.low_performance);
        let m = &layout.monitors[0];
        assert_eq!(m.id, "HDMI-1");
        assert!(m.primary);
        assert_eq!((m.xoffset, m.yoffset), (1920, 0));
        assert_eq!((m.xmode, m.ymode), (2560, 1440));
        assert_eq!(m.rate, 59.95);
        assert_eq!(m.rotation, Rotation::Left);
        assert!(m.mode.is_none(), "mode reference stays unset until resolution");
    }

    #[test]
    fn missing_keys_use_defaults() {
        let got = layouts("[[screen]]\n[[monitor]]\nid=\"eDP-1\"\n");
        let layout = &got[0];
        assert_eq!(layout.name, None);
        assert_eq!(layout.dpi, 0);
        assert!(!layout.low_performance);
        let m = &layout.monitors[0];
        assert_eq!((m.xmode, m.ymode, m.xoffset, m.yoffset), (0, 0, 0, 0));
        assert_eq!(m.rate, 0.0);
        assert_eq!(m.rotation, Rotation::Normal);
        assert!(!m.primary);
    }

    #[test]
    fn mistyped_value_degrades_to_default() {
        // dpi is not numeric, primary is not a boolean: both unspecified.
        let got = layouts(
            "[[screen]]\ndpi=\"high\"\n[[monitor]]\nid=\"eDP-1\"\nprimary=yes\n",
        );
        assert_eq!(got[0].dpi, 0);
        assert!(!got[0].monitors[0].primary);
    }

    #[test]
    fn unquoted_id_skips_the_monitor() {
        let got = layouts(
            "[[screen]]\n[[monitor]]\nid=eDP-1\n[[monitor]]\nid=\"HDMI-1\"\n",
        );
        assert_eq!(got[0].monitors.len(), 1);
        assert_eq!(got[0].monitors[0].id, "HDMI-1");
    }

    #[test]
    fn empty_id_skips_the_monitor() {
        let got = layouts("[[screen]]\n[[monitor]]\nid=\"\"\n");
        assert!(got[0].monitors.is_empty());
    }

    #[test]
    fn unknown_rotation_degrades_to_normal() {
        let got = layouts("[[screen]]\n[[monitor]]\nid=\"eDP-1\"\nrotation=\"upside\"\n");
        assert_eq!(got[0].monitors[0].rotation, Rotation::Normal);
    }

    #[test]
    fn multiple_screens_preserve_config_order() {
        let got = layouts(
            "[[screen]]\nname=\"one\"\n[[screen]]\nname=\"two\"\n[[screen]]\nname=\"three\"\n",
        );
        let names: Vec<_> = got.iter().map(MonitorLayout::label).collect();
        assert_eq!(names, ["one", "two", "three"]);
    }
}
