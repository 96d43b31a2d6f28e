//! Apply the overrides document to normalized windows.

use tracing::{debug, trace};

use crate::document::{Override, OverridesDocument};
use crate::window::{Window, sort_by_start};

/// Apply every override in document order and return the re-sorted result.
///
/// `None` (no overrides file, or it failed to load) passes the windows
/// through unchanged. Actions with missing fields, unknown action kinds and
/// ranges that match nothing are silent no-ops.
pub fn apply_overrides(windows: &[Window], overrides: Option<&OverridesDocument>) -> Vec<Window> {
    let mut list = windows.to_vec();

    let Some(overrides) = overrides else {
        return list;
    };

    for action in &overrides.overrides {
        match action {
            Override::Replace {
                range: Some(range),
                with: Some(patch),
            } => {
                let mut matched = 0;
                for window in list.iter_mut().filter(|w| w.spans(range.start, range.end)) {
                    *window = patch.apply_to(window);
                    matched += 1;
                }
                trace!(start = %range.start, end = %range.end, matched, "replace");
            }
            Override::Add {
                window: Some(descriptor),
            } => {
                if let Some(window) = descriptor.to_window() {
                    trace!(window = %window, "add");
                    list.push(window);
                }
            }
            Override::Remove { range: Some(range) } => {
                let before = list.len();
                list.retain(|w| !w.spans(range.start, range.end));
                trace!(start = %range.start, end = %range.end, removed = before - list.len(), "remove");
            }
            _ => {}
        }
    }

    sort_by_start(&mut list);

    debug!(
        actions = overrides.overrides.len(),
        before = windows.len(),
        after = list.len(),
        "applied overrides"
    );

    list
}
