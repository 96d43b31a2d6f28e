//! Coalesce back-to-back windows showing the same map.

use crate::window::Window;

/// Collapse runs of same map+variant windows where each one ends exactly
/// when the next starts. The merged window keeps the first window's
/// confidence, tags and note.
///
/// Expects `windows` sorted by start; only neighbours in list order merge.
pub fn merge_consecutive(windows: &[Window]) -> Vec<Window> {
    let mut merged: Vec<Window> = Vec::with_capacity(windows.len());

    for next in windows {
        match merged.last_mut() {
            Some(current) if current.same_content(next) && current.end == next.start => {
                current.end = next.end;
            }
            _ => merged.push(next.clone()),
        }
    }

    merged
}
