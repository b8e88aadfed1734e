/// Cumulative position of a single row.
///
/// Returned by value: the table itself is owned by [`crate::VirtualCore`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    /// Sum of the heights of every row before this one.
    pub top: f64,
    /// `top + height`.
    pub bottom: f64,
    pub height: f64,
}

/// The contiguous slice of rows a host should materialize.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    /// Translation to apply so `start_index` lands at its cumulative top.
    pub offset: f64,
    /// First row intersecting the viewport (before the buffer is applied).
    pub anchor_index: usize,
}

impl RenderRange {
    /// The range returned for an empty table.
    pub const fn empty() -> Self {
        Self {
            start_index: 0,
            end_index: 0,
            offset: 0.0,
            anchor_index: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// Inclusive index of the last rendered row.
    pub fn last_index(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end_index - 1)
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// A measured height for one row.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightUpdate {
    pub index: usize,
    /// Must be positive and finite; other values are dropped by `update_heights`.
    pub height: f64,
}

impl HeightUpdate {
    pub fn new(index: usize, height: f64) -> Self {
        Self { index, height }
    }

    pub(crate) fn is_valid_for(&self, total: usize) -> bool {
        self.index < total && self.height.is_finite() && self.height > 0.0
    }
}

impl From<(usize, f64)> for HeightUpdate {
    fn from((index, height): (usize, f64)) -> Self {
        Self { index, height }
    }
}

/// Result of [`crate::VirtualCore::update_heights`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightUpdateOutcome {
    /// Delta the host must add to its scroll position to keep on-screen content fixed.
    pub scroll_correction: f64,
    /// Smallest row index whose height actually changed.
    pub first_changed: Option<usize>,
}

impl HeightUpdateOutcome {
    pub fn changed(&self) -> bool {
        self.first_changed.is_some()
    }
}
