use crate::manager::PreparedText;
use quire_render_core::Canvas;
use quire_style::ResolvedStyle;
use quire_types::Alignment;

/// Draws one already-wrapped line of `prepared` at `baseline_y`.
///
/// `x` and `max_width` describe the horizontal slot; alignment positions the
/// line inside it. Returns the x where the glyphs start.
pub fn write_text_line(
    canvas: &mut Canvas,
    line: &str,
    prepared: &PreparedText,
    x: f32,
    baseline_y: f32,
    max_width: f32,
    style: &ResolvedStyle,
) -> f32 {
    let font = &prepared.font;
    let size = prepared.font_size;
    let width = font.measure(line, size);
    let start_x = match style.alignment {
        Alignment::Left => x,
        Alignment::Center => x + (max_width - width) / 2.0,
        Alignment::Right => x + max_width - width,
    };

    if !line.is_empty() {
        canvas.text(&font.resource_name, size, start_x, baseline_y, style.color, line);
    }

    if style.style.underline && width > 0.0 {
        let (position, thickness) = font
            .metrics
            .underline
            .map(|m| (m.position as f32, m.thickness as f32))
            .unwrap_or((-100.0, 50.0));
        let thickness = thickness * size / 1000.0;
        let y = baseline_y + position * size / 1000.0 - thickness;
        canvas.line((start_x, y), (start_x + width, y), thickness, style.color);
    }

    start_x
}
