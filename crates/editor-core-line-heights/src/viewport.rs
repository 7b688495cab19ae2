//! Converting between line numbers and vertical offsets for a virtualized view.

use crate::index::LineHeightIndex;
use std::ops::RangeInclusive;

impl LineHeightIndex {
    /// Vertical offset of the top edge of `line_number`.
    pub fn top_of_line(&mut self, line_number: usize) -> u64 {
        self.cumulative_height_through(line_number.saturating_sub(1))
    }

    /// Total height of a document with `line_count` lines.
    pub fn total_height(&mut self, line_count: usize) -> u64 {
        self.cumulative_height_through(line_count)
    }

    /// The line whose vertical extent `[top, top + height)` contains `offset`.
    ///
    /// Lines continue past the end of any real document at the default height, so callers
    /// should clamp the result to their line count. Zero-height lines are never returned.
    pub fn line_at_offset(&mut self, offset: u64) -> usize {
        self.commit();
        let default_height = u64::from(self.default_height());

        // Last run starting at or above `offset`.
        let index = self
            .records
            .partition_point(|line| line.cumulative_before <= offset);
        if index == 0 {
            return 1 + (offset / default_height) as usize;
        }

        let line = &self.records[index - 1];
        let through = line.cumulative_through();
        if offset < through {
            return line.line_number;
        }
        line.line_number + 1 + ((offset - through) / default_height) as usize
    }

    /// Lines intersecting a viewport of `viewport_height` starting at `scroll_top`, clamped to
    /// a document of `line_count` lines.
    ///
    /// Returns `None` for an empty document, an empty viewport, or a viewport scrolled past the
    /// end of the document.
    pub fn visible_lines(
        &mut self,
        scroll_top: u64,
        viewport_height: u64,
        line_count: usize,
    ) -> Option<RangeInclusive<usize>> {
        if line_count == 0 || viewport_height == 0 {
            return None;
        }

        let first = self.line_at_offset(scroll_top);
        if first > line_count {
            return None;
        }

        let bottom = scroll_top.saturating_add(viewport_height - 1);
        let last = self.line_at_offset(bottom).min(line_count);
        Some(first..=last)
    }
}
