//! Cell borders, drawn so that every shared edge appears exactly once.

use quire_render_core::Canvas;
use quire_style::ResolvedStyle;

/// Which edges one cell is responsible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// Top and bottom are always drawn. The right edge belongs to a single-column
/// cell or to a span that reaches the last column; the left edge to a cell in
/// the first column or one following a multi-column span, whose right edge
/// was skipped.
pub(crate) fn owned_edges(
    first_column: usize,
    span: usize,
    column_count: usize,
    previous_span: Option<usize>,
) -> Edges {
    let ends_at_last = first_column + span >= column_count;
    Edges {
        top: true,
        bottom: true,
        right: span == 1 || ends_at_last,
        left: first_column == 0 || previous_span.is_some_and(|s| s > 1),
    }
}

/// Draws the owned edges of the box with top-left corner (`x`, `top`).
pub(crate) fn draw_cell_borders(
    canvas: &mut Canvas,
    style: &ResolvedStyle,
    edges: Edges,
    x: f32,
    top: f32,
    width: f32,
    height: f32,
) {
    let thickness = &style.border_thickness;
    let color = style.border_color;
    let bottom = top - height;
    let right = x + width;

    if edges.top {
        canvas.line((x, top), (right, top), thickness.top.pt(), color);
    }
    if edges.bottom {
        canvas.line((x, bottom), (right, bottom), thickness.bottom.pt(), color);
    }
    if edges.left {
        canvas.line((x, top), (x, bottom), thickness.left.pt(), color);
    }
    if edges.right {
        canvas.line((right, top), (right, bottom), thickness.right.pt(), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_columns_share_edges_once() {
        let edges: Vec<_> = (0..3)
            .map(|c| owned_edges(c, 1, 3, (c > 0).then_some(1)))
            .collect();
        assert!(edges[0].left && edges[0].right);
        assert!(!edges[1].left && edges[1].right);
        assert!(!edges[2].left && edges[2].right);
    }

    #[test]
    fn test_cell_after_span_draws_shared_edge() {
        // [0..2 span 2][2 span 1]
        let span = owned_edges(0, 2, 3, None);
        let after = owned_edges(2, 1, 3, Some(2));
        assert!(span.left && !span.right);
        assert!(after.left && after.right);
    }

    #[test]
    fn test_span_to_last_column_closes_table() {
        // [0 span 1][1..3 span 2]
        let first = owned_edges(0, 1, 3, None);
        let span = owned_edges(1, 2, 3, Some(1));
        assert!(first.right);
        assert!(!span.left && span.right);
    }
}
