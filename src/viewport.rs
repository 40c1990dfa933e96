/// Cursor and scroll window over the visible entry sequence.
///
/// All operations are total: out-of-range requests clamp instead of failing.
/// After any mutation, `top <= cursor <= bottom_index()` holds, and the cursor
/// is a valid index into a visible sequence of the last given length (or 0
/// when that sequence is empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    cursor: usize,
    top: usize,
    page_height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            cursor: 0,
            top: 0,
            page_height: 1,
        }
    }
}

impl Viewport {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn page_height(&self) -> usize {
        self.page_height
    }

    /// Index of the last row inside the window.
    pub fn bottom_index(&self) -> usize {
        self.top + self.page_height - 1
    }

    /// Resize the window; a zero height is treated as one row.
    pub fn set_page_height(&mut self, rows: usize) {
        self.page_height = rows.max(1);
        self.sync_viewport();
    }

    /// Move the cursor by `delta` rows, clamping into `[0, len - 1]`.
    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        self.cursor = self.cursor.saturating_add_signed(delta);
        self.sync_cursor(len);
        self.sync_viewport();
    }

    pub fn set_cursor(&mut self, index: usize, len: usize) {
        self.cursor = index;
        self.sync_cursor(len);
        self.sync_viewport();
    }

    /// Move by half a page (`direction` is +1 or -1).
    pub fn half_page(&mut self, direction: isize, len: usize) {
        let step = (self.page_height / 2).max(1) as isize;
        self.move_cursor(direction * step, len);
    }

    /// Move by a full page (`direction` is +1 or -1).
    pub fn full_page(&mut self, direction: isize, len: usize) {
        self.move_cursor(direction * self.page_height as isize, len);
    }

    /// Jump to the first entry.
    pub fn jump_start(&mut self, len: usize) {
        self.set_cursor(0, len);
    }

    /// Jump to the last entry.
    pub fn jump_end(&mut self, len: usize) {
        self.set_cursor(len.saturating_sub(1), len);
    }

    /// Return cursor and window to the top, as after a fresh listing.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.top = 0;
    }

    /// Clamp the cursor into the visible sequence.
    pub fn sync_cursor(&mut self, len: usize) {
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    /// Scroll the window just enough to contain the cursor. Never recenters.
    pub fn sync_viewport(&mut self) {
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor > self.bottom_index() {
            self.top = self.cursor + 1 - self.page_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(cursor: usize, top: usize, page_height: usize) -> Viewport {
        Viewport {
            cursor,
            top,
            page_height,
        }
    }

    fn assert_invariants(vp: &Viewport, len: usize) {
        if len == 0 {
            assert_eq!(vp.cursor(), 0);
        } else {
            assert!(vp.cursor() < len);
        }
        assert!(vp.top() <= vp.cursor());
        assert!(vp.cursor() <= vp.bottom_index());
    }

    #[test]
    fn scrolls_minimally_past_bottom() {
        let mut vp = viewport(4, 0, 5);
        vp.move_cursor(3, 20);
        assert_eq!(vp.cursor(), 7);
        assert_eq!(vp.top(), 3);
        assert_eq!(vp.bottom_index(), 7);
    }

    #[test]
    fn scrolling_up_pins_top_to_cursor() {
        let mut vp = viewport(10, 8, 5);
        vp.move_cursor(-4, 20);
        assert_eq!(vp.cursor(), 6);
        assert_eq!(vp.top(), 6);
    }

    #[test]
    fn moving_inside_window_does_not_scroll() {
        let mut vp = viewport(5, 3, 5);
        vp.move_cursor(1, 20);
        assert_eq!(vp.top(), 3);
        vp.move_cursor(-2, 20);
        assert_eq!(vp.top(), 3);
    }

    #[test]
    fn clamps_at_both_ends() {
        let mut vp = Viewport::default();
        vp.set_page_height(5);
        vp.move_cursor(-3, 10);
        assert_eq!(vp.cursor(), 0);
        vp.move_cursor(100, 10);
        assert_eq!(vp.cursor(), 9);
        assert_invariants(&vp, 10);
    }

    #[test]
    fn empty_sequence_forces_zero() {
        let mut vp = viewport(3, 0, 5);
        vp.move_cursor(1, 0);
        assert_eq!(vp.cursor(), 0);
        assert_eq!(vp.top(), 0);
    }

    #[test]
    fn jump_start_and_end() {
        let mut vp = Viewport::default();
        vp.set_page_height(4);
        vp.jump_end(12);
        assert_eq!(vp.cursor(), 11);
        assert_eq!(vp.top(), 8);
        vp.jump_start(12);
        assert_eq!(vp.cursor(), 0);
        assert_eq!(vp.top(), 0);
    }

    #[test]
    fn page_motions() {
        let mut vp = Viewport::default();
        vp.set_page_height(10);
        vp.half_page(1, 100);
        assert_eq!(vp.cursor(), 5);
        vp.full_page(1, 100);
        assert_eq!(vp.cursor(), 15);
        assert_eq!(vp.top(), 6);
        vp.full_page(-1, 100);
        assert_eq!(vp.cursor(), 5);
        vp.half_page(-1, 100);
        assert_eq!(vp.cursor(), 0);
    }

    #[test]
    fn half_page_moves_at_least_one_row() {
        let mut vp = Viewport::default();
        vp.set_page_height(1);
        vp.half_page(1, 3);
        assert_eq!(vp.cursor(), 1);
    }

    #[test]
    fn shrinking_page_rescrolls() {
        let mut vp = viewport(9, 0, 10);
        vp.set_page_height(4);
        assert_eq!(vp.top(), 6);
        assert_invariants(&vp, 20);
    }

    #[test]
    fn zero_height_is_one_row() {
        let mut vp = Viewport::default();
        vp.set_page_height(0);
        assert_eq!(vp.page_height(), 1);
        vp.move_cursor(2, 5);
        assert_eq!(vp.top(), 2);
    }

    #[test]
    fn set_cursor_clamps() {
        let mut vp = Viewport::default();
        vp.set_page_height(3);
        vp.set_cursor(50, 8);
        assert_eq!(vp.cursor(), 7);
        assert_invariants(&vp, 8);
    }

    #[test]
    fn shrinking_sequence_reclamps_cursor() {
        let mut vp = viewport(7, 5, 5);
        vp.sync_cursor(3);
        vp.sync_viewport();
        assert_eq!(vp.cursor(), 2);
        assert_eq!(vp.top(), 2);
    }

    #[test]
    fn invariants_hold_over_move_sequences() {
        let deltas: [isize; 12] = [1, 5, -2, 30, -100, 7, 7, 7, -1, 64, -3, 2];
        for len in [0usize, 1, 3, 9, 40] {
            for page in [1usize, 2, 5, 13] {
                let mut vp = Viewport::default();
                vp.set_page_height(page);
                for d in deltas {
                    let before_top = vp.top();
                    vp.move_cursor(d, len);
                    assert_invariants(&vp, len);
                    // never scrolls further than needed
                    if vp.top() > before_top {
                        assert_eq!(vp.cursor(), vp.bottom_index());
                    } else if vp.top() < before_top {
                        assert_eq!(vp.cursor(), vp.top());
                    }
                }
            }
        }
    }
}
