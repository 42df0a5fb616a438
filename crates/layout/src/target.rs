use crate::LayoutError;
use quire_render_core::Canvas;

/// The surface a table flows onto: a cursor moving down a stack of pages.
///
/// Y grows upwards (PDF user space), so flowing down decreases `cursor_y`.
pub trait FlowTarget {
    fn cursor_y(&self) -> f32;

    fn set_cursor_y(&mut self, y: f32);

    /// Nothing may be drawn below this line on the current page.
    fn lowest_y(&self) -> f32;

    /// True while nothing has been placed below the top of the current page.
    fn at_page_top(&self) -> bool;

    /// Starts a fresh page and moves the cursor to its top.
    fn new_page(&mut self) -> Result<(), LayoutError>;

    /// Canvas of the current page.
    fn canvas(&mut self) -> &mut Canvas;
}
