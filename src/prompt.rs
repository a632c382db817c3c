//! Interactive layout selection through an external menu program.
//!
//! The menu is one line per candidate layout, `<label>\t<index>`, piped to
//! the selector's stdin; the selector echoes the chosen line, and the
//! tab-delimited index is parsed back out. A missing or unparsable index
//! (the user pressed escape, or typed free text) is a cancellation, never
//! an error.

use std::ffi::OsStr;

use tracing::debug;

use crate::error::PromptError;
use crate::exec;
use crate::layout::MonitorLayout;

/// The menu-selector binary, located on `PATH`.
pub const SELECTOR_PROGRAM: &str = "dmenu";

/// Render the selection menu: one `label\tindex` line per layout, no
/// trailing newline.
#[must_use]
pub fn format_menu(layouts: &[MonitorLayout]) -> String {
    layouts
        .iter()
        .enumerate()
        .map(|(index, layout)| format!("{}\t{index}", layout.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse the selector's response: the integer following the first tab.
#[must_use]
pub fn parse_selection(response: &str) -> Option<usize> {
    let (_, after) = response.split_once('\t')?;
    after.trim().parse().ok()
}

/// Run the selector over the candidate layouts and return the chosen index,
/// or `None` on cancellation. `extra_args` are forwarded to the selector
/// verbatim. An empty candidate set returns `None` without spawning.
///
/// # Errors
///
/// Returns [`PromptError`] when the selector binary cannot be located or
/// the process cannot be spawned.
pub fn select(
    layouts: &[MonitorLayout],
    extra_args: &[String],
) -> Result<Option<usize>, PromptError> {
    if layouts.is_empty() {
        return Ok(None);
    }

    let program = which::which(SELECTOR_PROGRAM).map_err(|source| PromptError::NotFound {
        program: SELECTOR_PROGRAM.to_string(),
        source,
    })?;

    let menu = format_menu(layouts);
    debug!(program = %program.display(), entries = layouts.len(), "prompting for layout");

    let result = exec::run_with_input(OsStr::new(&program), extra_args, &menu).map_err(
        |source| PromptError::Process {
            program: SELECTOR_PROGRAM.to_string(),
            source,
        },
    )?;

    if !result.success {
        // Selectors exit non-zero on escape; treat it as cancellation.
        debug!(code = ?result.code, "selector exited without a choice");
        return Ok(None);
    }
    Ok(parse_selection(&result.stdout))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::MonitorLayout;

    fn named(name: Option<&str>) -> MonitorLayout {
        MonitorLayout {
            name: name.map(String::from),
            dpi: 0,
            low_performance: false,
            monitors: vec![],
        }
    }

    #[test]
    fn menu_tags_each_layout_with_its_index() {
        let layouts = vec![named(Some("docked")), named(Some("mobile"))];
        assert_eq!(format_menu(&layouts), "docked\t0\nmobile\t1");
    }

    #[test]
    fn menu_has_no_trailing_newline() {
        let layouts = vec![named(Some("only"))];
        assert_eq!(format_menu(&layouts), "only\t0");
    }

    #[test]
    fn nameless_layouts_get_a_placeholder_label() {
        let layouts = vec![named(None)];
        assert_eq!(format_menu(&layouts), "unnamed\t0");
    }

    #[test]
    fn selection_is_the_integer_after_the_tab() {
        assert_eq!(parse_selection("docked\t2\n"), Some(2));
        assert_eq!(parse_selection("docked\t0"), Some(0));
    }

    #[test]
    fn response_without_tab_is_cancellation() {
        assert_eq!(parse_selection(""), None);
        assert_eq!(parse_selection("docked"), None);
        assert_eq!(parse_selection("free text typed by the user\n"), None);
    }

    #[test]
    fn unparsable_index_is_cancellation() {
        assert_eq!(parse_selection("docked\tnot-a-number\n"), None);
        assert_eq!(parse_selection("docked\t-1\n"), None);
        assert_eq!(parse_selection("docked\t\n"), None);
    }

    #[test]
    fn label_containing_tab_does_not_break_index_parsing() {
        // The index is taken after the *first* tab; a tab inside the label
        // makes the remainder unparsable and reads as cancellation, rather
        // than selecting an arbitrary layout.
        assert_eq!(parse_selection("odd\tlabel\t1\n"), None);
    }

    #[test]
    fn empty_candidate_set_selects_nothing() {
        assert_eq!(select(&[], &[]).unwrap(), None);
    }
}
