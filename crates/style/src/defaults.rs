use crate::options::StyleFlags;
use quire_types::{Alignment, Color, FourSides, Length};
use serde::{Deserialize, Serialize};

/// Builtin serif family used when a font key is unknown.
pub const BUILTIN_FONT_KEY: &str = "Times";

/// The bottom of every cascade. Always fully populated, so resolution can never
/// come up empty.
///
/// `margin` and `border_thickness` double as the builtin values that decide
/// whether an inner level's side was set explicitly (see
/// [`FourSides::override_defaults`]).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentDefaults {
    pub alignment: Alignment,
    pub color: Color,
    pub font: String,
    pub text_height: Length,
    pub line_height: f32,
    pub style: StyleFlags,
    pub margin: FourSides<Length>,
    pub border_thickness: FourSides<Length>,
    /// Unset means "same as the resolved text color".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            color: Color::BLACK,
            font: BUILTIN_FONT_KEY.to_string(),
            text_height: Length::from_mm(3.0),
            line_height: 1.5,
            style: StyleFlags::REGULAR,
            margin: FourSides::all(Length::from_mm(1.0)),
            border_thickness: FourSides::all(Length::ZERO),
            border_color: None,
        }
    }
}

impl DocumentDefaults {
    /// Vertical distance between two consecutive baselines, in points.
    pub fn line_pitch_pt(&self) -> f32 {
        self.text_height.pt() * self.line_height
    }
}
