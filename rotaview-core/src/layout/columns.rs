//! Greedy column assignment for overlapping windows.

use chrono::{DateTime, Utc};

use crate::window::Window;

/// Columns of non-overlapping windows, filled in arrival order.
#[derive(Debug, Default)]
pub struct Columns {
    /// End of the last window placed in each column
    ends: Vec<DateTime<Utc>>,
}

impl Columns {
    /// Place `window` in the first column whose last window ends by the time
    /// this one starts, opening a new column when none does.
    /// Returns the column index.
    pub fn place(&mut self, window: &Window) -> usize {
        match self.ends.iter().position(|end| *end <= window.start) {
            Some(column) => {
                self.ends[column] = window.end;
                column
            }
            None => {
                self.ends.push(window.end);
                self.ends.len() - 1
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}

/// Assign a column to each window, in the given order.
pub fn assign_columns(windows: &[Window]) -> (Vec<usize>, usize) {
    let mut columns = Columns::default();
    let assigned = windows.iter().map(|w| columns.place(w)).collect();
    (assigned, columns.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::tests::{at, make_window};

    #[test]
    fn test_back_to_back_windows_share_a_column() {
        let windows = vec![
            make_window("A", "V", at(10, 0), at(11, 0)),
            make_window("B", "V", at(11, 0), at(12, 0)),
        ];

        assert_eq!(assign_columns(&windows), (vec![0, 0], 1));
    }

    #[test]
    fn test_overlaps_open_new_columns() {
        let windows = vec![
            make_window("All", "Day", at(0, 0), at(23, 0)),
            make_window("A", "V", at(10, 0), at(12, 0)),
            make_window("B", "V", at(11, 0), at(12, 0)),
            make_window("C", "V", at(12, 0), at(13, 0)),
        ];

        let (assigned, count) = assign_columns(&windows);
        assert_eq!(assigned, vec![0, 1, 2, 1]);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_same_column_never_overlaps() {
        let windows = vec![
            make_window("A", "V", at(8, 0), at(12, 0)),
            make_window("B", "V", at(9, 0), at(10, 0)),
            make_window("C", "V", at(10, 0), at(11, 30)),
            make_window("D", "V", at(11, 0), at(13, 0)),
            make_window("E", "V", at(12, 0), at(14, 0)),
            make_window("F", "V", at(13, 15), at(13, 45)),
        ];

        let (assigned, count) = assign_columns(&windows);
        for column in 0..count {
            let placed: Vec<_> = windows
                .iter()
                .zip(&assigned)
                .filter(|(_, c)| **c == column)
                .map(|(w, _)| w)
                .collect();
            for (i, a) in placed.iter().enumerate() {
                for b in &placed[i + 1..] {
                    assert!(a.end <= b.start || b.end <= a.start, "{a} overlaps {b}");
                }
            }
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(assign_columns(&[]), (vec![], 0));
        assert!(Columns::default().is_empty());
    }
}
