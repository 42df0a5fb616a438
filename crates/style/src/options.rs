//! Per-level style records. Every field is optional; an unset field defers to the
//! next level of the cascade.

use quire_types::{Alignment, Color, FourSides, Length};
use serde::{Deserialize, Serialize};

/// Bold/italic select the font face; underline is drawn separately and never
/// affects font selection.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(default)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyleFlags {
    pub const REGULAR: StyleFlags = StyleFlags {
        bold: false,
        italic: false,
        underline: false,
    };

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::REGULAR
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::REGULAR
        }
    }

    pub fn underline() -> Self {
        Self {
            underline: true,
            ..Self::REGULAR
        }
    }

    pub fn without_underline(self) -> Self {
        Self {
            underline: false,
            ..self
        }
    }
}

#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Logical font-set key registered with the text manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Height of the glyphs (ascender to descender), not the font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_height: Option<Length>,
    /// Multiplier applied to `text_height` to get the line pitch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    /// On a column: a positive value is a fixed width, a non-positive one a
    /// proportional weight. Elsewhere it limits the text width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<FourSides<Length>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_thickness: Option<FourSides<Length>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn font(mut self, key: impl Into<String>) -> Self {
        self.font = Some(key.into());
        self
    }

    pub fn text_height(mut self, height: Length) -> Self {
        self.text_height = Some(height);
        self
    }

    pub fn line_height(mut self, factor: f32) -> Self {
        self.line_height = Some(factor);
        self
    }

    pub fn max_width(mut self, width: Length) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn style(mut self, flags: StyleFlags) -> Self {
        self.style = Some(flags);
        self
    }

    pub fn margin(mut self, margin: impl Into<FourSides<Length>>) -> Self {
        self.margin = Some(margin.into());
        self
    }

    pub fn border_thickness(mut self, thickness: impl Into<FourSides<Length>>) -> Self {
        self.border_thickness = Some(thickness.into());
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }
}
