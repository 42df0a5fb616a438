//! Canvas to content-stream translation.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use quire_render_core::{Canvas, DrawOp};
use quire_types::Color;

/// Encodes text in the single-byte encoding every font dictionary declares.
/// Characters outside Latin-1 become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}

#[derive(Default)]
struct GraphicsState {
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: Option<f32>,
}

/// Accumulates the operations of one content stream, skipping color and line
/// width changes that would not change anything.
pub(crate) struct PageContext {
    content: Content,
    state: GraphicsState,
}

impl PageContext {
    pub(crate) fn new() -> Self {
        Self {
            content: Content { operations: vec![] },
            state: GraphicsState::default(),
        }
    }

    pub(crate) fn draw_canvas(&mut self, canvas: &Canvas) {
        for op in canvas.ops() {
            match op {
                DrawOp::Text {
                    font,
                    size,
                    x,
                    y,
                    color,
                    text,
                } => self.draw_text(font, *size, *x, *y, *color, text),
                DrawOp::Line {
                    from,
                    to,
                    thickness,
                    color,
                } => self.draw_line(*from, *to, *thickness, *color),
                DrawOp::Image {
                    name,
                    x,
                    y,
                    width,
                    height,
                } => self.draw_image(name, *x, *y, *width, *height),
            }
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            let (r, g, b) = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.stroke != Some(color) {
            let (r, g, b) = color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke = Some(color);
        }
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    fn draw_text(&mut self, font: &str, size: f32, x: f32, y: f32, color: Color, text: &str) {
        if text.is_empty() {
            return;
        }
        self.set_fill_color(color);
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]);
        self.push("Td", vec![x.into(), y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32, color: Color) {
        self.set_stroke(color, thickness);
        self.push("m", vec![from.0.into(), from.1.into()]);
        self.push("l", vec![to.0.into(), to.1.into()]);
        self.push("S", vec![]);
    }

    fn draw_image(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) {
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }
}
