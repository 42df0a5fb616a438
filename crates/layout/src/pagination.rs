/// Tolerance for float drift accumulated while stacking rows.
pub const EPSILON: f32 = 0.01;

/// Whether a block of `height` starting at `cursor_y` stays above `lowest_y`.
pub fn fits(cursor_y: f32, height: f32, lowest_y: f32) -> bool {
    cursor_y - height >= lowest_y - EPSILON
}

/// Whether placing a block of `height` calls for a new page first. A page that
/// nothing has been written to yet never breaks, since the next one would be
/// no taller.
pub fn needs_break(cursor_y: f32, height: f32, lowest_y: f32, at_page_top: bool) -> bool {
    !at_page_top && !fits(cursor_y, height, lowest_y)
}
