use quire_types::Color;

/// A single drawing primitive in PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        /// Resource name of the font, e.g. `F1`.
        font: String,
        size: f32,
        x: f32,
        y: f32,
        color: Color,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Color,
    },
    Image {
        /// Resource name of the image XObject, e.g. `Im1`.
        name: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(
        &mut self,
        font: &str,
        size: f32,
        x: f32,
        y: f32,
        color: Color,
        text: impl Into<String>,
    ) {
        self.ops.push(DrawOp::Text {
            font: font.to_string(),
            size,
            x,
            y,
            color,
            text: text.into(),
        });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32, color: Color) {
        if thickness <= 0.0 {
            return;
        }
        self.ops.push(DrawOp::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    pub fn image(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Image {
            name: name.to_string(),
            x,
            y,
            width,
            height,
        });
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Strings of every text op, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// One output page. `content` is drawn while flowing; `overlay` is filled by the
/// finalize pass once the page count is known, and ends up on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub content: Canvas,
    pub overlay: Canvas,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            content: Canvas::new(),
            overlay: Canvas::new(),
        }
    }
}
