use alloc::vec::Vec;

use crate::ItemPosition;

/// Per-row `top`/`bottom`/`height` records, kept gap-free.
///
/// Invariants (checked by `debug_check` in tests):
/// - `rows[0].top == 0`
/// - `rows[i].bottom == rows[i].top + rows[i].height`
/// - `rows[i].top == rows[i - 1].bottom`
///
/// Height writes (`set_height`) do not touch offsets; callers must follow a batch of writes with
/// a single `recompute_from(min_changed_index)`.
#[derive(Clone, Debug, Default)]
pub(crate) struct PositionTable {
    rows: Vec<ItemPosition>,
}

impl PositionTable {
    pub(crate) fn uniform(len: usize, height: f64) -> Self {
        let mut table = Self {
            rows: Vec::with_capacity(len),
        };
        table.grow(len, height);
        table
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<ItemPosition> {
        self.rows.get(index).copied()
    }

    pub(crate) fn rows(&self) -> &[ItemPosition] {
        &self.rows
    }

    pub(crate) fn total_height(&self) -> f64 {
        self.rows.last().map_or(0.0, |row| row.bottom)
    }

    /// Appends rows of `height` until the table holds `new_len` rows.
    ///
    /// New rows are anchored at the current total height; existing rows are untouched.
    pub(crate) fn grow(&mut self, new_len: usize, height: f64) {
        let mut top = self.total_height();
        self.rows
            .reserve_exact(new_len.saturating_sub(self.rows.len()));
        while self.rows.len() < new_len {
            let bottom = top + height;
            self.rows.push(ItemPosition {
                top,
                bottom,
                height,
            });
            top = bottom;
        }
    }

    pub(crate) fn truncate(&mut self, new_len: usize) {
        self.rows.truncate(new_len);
    }

    /// Replaces a row's height. Offsets are stale until `recompute_from`.
    pub(crate) fn set_height(&mut self, index: usize, height: f64) {
        if let Some(row) = self.rows.get_mut(index) {
            row.height = height;
        }
    }

    /// Rebuilds `top`/`bottom` for `start..len`. `O(len - start)`.
    pub(crate) fn recompute_from(&mut self, start: usize) {
        if start >= self.rows.len() {
            return;
        }
        let mut top = match start {
            0 => 0.0,
            _ => self.rows[start - 1].bottom,
        };
        for row in &mut self.rows[start..] {
            row.top = top;
            row.bottom = top + row.height;
            top = row.bottom;
        }
    }

    /// Returns the index of the first row whose `bottom` is greater than `offset`.
    ///
    /// - `offset <= 0` maps to `0`.
    /// - `offset >= total_height()` maps to `len()` (one past the end); callers clamp.
    ///
    /// Runs in `O(log n)`: bottoms are non-decreasing, so this is a partition point.
    pub(crate) fn find_start_index(&self, offset: f64) -> usize {
        if self.rows.is_empty() || offset <= 0.0 {
            return 0;
        }
        if offset >= self.total_height() {
            return self.rows.len();
        }
        self.rows.partition_point(|row| row.bottom <= offset)
    }

    #[cfg(test)]
    pub(crate) fn debug_check(&self) {
        let mut expected_top = 0.0;
        for (i, row) in self.rows.iter().enumerate() {
            assert_eq!(row.top, expected_top, "row {i}: top is not the previous bottom");
            assert_eq!(
                row.bottom,
                row.top + row.height,
                "row {i}: bottom is not top + height"
            );
            expected_top = row.bottom;
        }
    }
}
