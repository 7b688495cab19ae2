//! Keeping overrides attached to their lines across text edits that add or remove lines.
//!
//! Only line numbers move here. Effective heights and prefix sums of the shifted records are
//! refreshed by the next commit.

use crate::index::LineHeightIndex;

impl LineHeightIndex {
    /// Lines `from..=to` (1-based, pre-edit numbering) were deleted.
    ///
    /// Overrides on the deleted lines are dropped; overrides below them move up.
    ///
    /// # Panics
    ///
    /// Panics if `from` is zero or `to < from`.
    pub fn on_lines_deleted(&mut self, from: usize, to: usize) {
        assert!(
            from >= 1 && to >= from,
            "invalid deleted line range {from}..={to}"
        );
        self.commit();

        let start = self.first_index_at_or_after(from);
        let end = self.first_index_at_or_after(to + 1);
        for line in self.records.drain(start..end) {
            self.positions.remove(&line.id);
        }

        let count = to - from + 1;
        self.shift_lines_from(start, |line_number| line_number - count);

        tracing::trace!(from, to, dropped = end - start, "line heights: lines deleted");
    }

    /// Lines `from..=to` (1-based, post-edit numbering) were inserted.
    ///
    /// Overrides on `from` and below move down with the text.
    ///
    /// # Panics
    ///
    /// Panics if `from` is zero or `to < from`.
    pub fn on_lines_inserted(&mut self, from: usize, to: usize) {
        assert!(
            from >= 1 && to >= from,
            "invalid inserted line range {from}..={to}"
        );
        self.commit();

        let start = self.first_index_at_or_after(from);
        let count = to - from + 1;
        self.shift_lines_from(start, |line_number| line_number + count);

        tracing::trace!(from, to, "line heights: lines inserted");
    }

    fn shift_lines_from(&mut self, start: usize, shift: impl Fn(usize) -> usize) {
        if start >= self.records.len() {
            return;
        }

        for (position, line) in self.records.iter_mut().enumerate().skip(start) {
            line.line_number = shift(line.line_number);
            self.positions.insert(line.id, position);
        }
        self.invalidate_from(start);
    }
}
