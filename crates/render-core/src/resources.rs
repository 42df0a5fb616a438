//! Fonts and images referenced from page canvases by resource name.

use crate::error::RenderError;
use image::GenericImageView;
use std::path::Path;
use std::sync::Arc;

/// First character code covered by [`FontMetrics::widths`] (WinAnsi space).
pub const FIRST_CHAR: u8 = 32;
pub const LAST_CHAR: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnderlineMetrics {
    pub position: i16,
    pub thickness: i16,
}

/// Glyph metrics scaled to a 1000-unit em, the unit PDF font dictionaries use.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    /// Advance widths for codes `FIRST_CHAR..=LAST_CHAR`.
    pub widths: Vec<u16>,
    pub missing_width: u16,
    pub ascender: i16,
    pub descender: i16,
    pub cap_height: i16,
    pub italic_angle: i16,
    pub bbox: (i16, i16, i16, i16),
    pub underline: Option<UnderlineMetrics>,
    pub fixed_pitch: bool,
}

impl FontMetrics {
    pub fn advance(&self, code: u8) -> u16 {
        if code < FIRST_CHAR {
            return self.missing_width;
        }
        self.widths
            .get((code - FIRST_CHAR) as usize)
            .copied()
            .unwrap_or(self.missing_width)
    }

    /// Ascender minus descender, in 1000-unit em.
    pub fn glyph_extent(&self) -> f32 {
        (self.ascender as f32 - self.descender as f32).max(1.0)
    }
}

#[derive(Debug, Clone)]
pub enum FontProgram {
    /// One of the standard 14 fonts; no program is embedded.
    Builtin,
    TrueType {
        data: Arc<Vec<u8>>,
        metrics: FontMetrics,
    },
}

#[derive(Debug, Clone)]
pub struct FontResource {
    /// Page resource name, e.g. `F1`.
    pub name: String,
    /// PostScript name written as `/BaseFont`.
    pub base_font: String,
    pub program: FontProgram,
}

/// A decoded raster image, split into 8-bit RGB samples and an optional alpha mask.
#[derive(Debug, Clone)]
pub struct ImageResource {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl ImageResource {
    pub fn load(name: &str, path: &Path) -> Result<Self, RenderError> {
        let decoded = image::open(path).map_err(|source| RenderError::Image {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_decoded(name, decoded))
    }

    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, RenderError> {
        let decoded = image::load_from_memory(bytes).map_err(|source| RenderError::Image {
            path: "<memory>".to_string(),
            source,
        })?;
        Ok(Self::from_decoded(name, decoded))
    }

    fn from_decoded(name: &str, decoded: image::DynamicImage) -> Self {
        let (width, height) = decoded.dimensions();
        let alpha = decoded.color().has_alpha().then(|| {
            decoded
                .to_rgba8()
                .pixels()
                .map(|pixel| pixel.0[3])
                .collect::<Vec<u8>>()
        });
        Self {
            name: name.to_string(),
            width,
            height,
            rgb: decoded.to_rgb8().into_raw(),
            alpha,
        }
    }

    /// Height in points when drawn `width_pt` wide with the aspect ratio kept.
    pub fn height_for_width(&self, width_pt: f32) -> f32 {
        if self.width == 0 {
            return 0.0;
        }
        width_pt * self.height as f32 / self.width as f32
    }
}
