//! Cursor and viewport arithmetic for a list of `len` rows shown `height`
//! rows at a time.

/// Cursor position and visible window `[low, high]`.
///
/// Also the unit saved on the history stack when a directory is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Index of the highlighted row.
    pub cursor: usize,
    /// First visible row.
    pub low: usize,
    /// Last visible row. May exceed the last row when the list is shorter
    /// than the viewport.
    pub high: usize,
}

impl Frame {
    /// Cursor on the first row, window at the top.
    #[must_use]
    pub const fn top(height: usize) -> Self {
        Self {
            cursor: 0,
            low: 0,
            high: height.saturating_sub(1),
        }
    }

    /// Moves the cursor one row up.
    pub fn up(&mut self, len: usize, height: usize) {
        self.cursor = self.cursor.saturating_sub(1);
        self.clamp(len, height);
    }

    /// Moves the cursor one row down.
    pub fn down(&mut self, len: usize, height: usize) {
        self.cursor = self.cursor.saturating_add(1);
        self.clamp(len, height);
    }

    /// Shifts cursor and window up by one page.
    pub fn page_up(&mut self, len: usize, height: usize) {
        self.cursor = self.cursor.saturating_sub(height);
        self.low = self.low.saturating_sub(height);
        self.clamp(len, height);
    }

    /// Shifts cursor and window down by one page.
    pub fn page_down(&mut self, len: usize, height: usize) {
        self.cursor = self.cursor.saturating_add(height);
        self.low = self.low.saturating_add(height);
        self.clamp(len, height);
    }

    /// Jumps to the first row.
    pub fn first(&mut self, len: usize, height: usize) {
        self.cursor = 0;
        self.clamp(len, height);
    }

    /// Jumps to the last row.
    pub fn last(&mut self, len: usize, height: usize) {
        self.cursor = len.saturating_sub(1);
        self.clamp(len, height);
    }

    /// Restores the invariants after any change of cursor, window, `len` or
    /// `height`:
    ///
    /// - `cursor <= len - 1`
    /// - `high - low + 1 == height`
    /// - the window never runs past the end of a list longer than `height`
    /// - `low <= cursor <= high`
    ///
    /// Only the window moves to keep the cursor visible; the cursor moves
    /// only when it is out of range.
    pub fn clamp(&mut self, len: usize, height: usize) {
        let height = height.max(1);
        if len == 0 {
            *self = Self::top(height);
            return;
        }

        self.cursor = self.cursor.min(len - 1);
        if len <= height {
            self.low = 0;
        } else {
            self.low = self.low.min(len - height);
        }
        self.high = self.low + height - 1;

        if self.cursor < self.low {
            self.low = self.cursor;
            self.high = self.low + height - 1;
        } else if self.cursor > self.high {
            self.high = self.cursor;
            self.low = self.high + 1 - height;
        }
    }

    /// Visible row indices that exist in a list of `len` rows.
    #[must_use]
    pub fn visible(&self, len: usize) -> std::ops::Range<usize> {
        self.low.min(len)..self.high.saturating_add(1).min(len)
    }
}
