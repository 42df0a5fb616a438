use crate::error::TextError;
use quire_render_core::{FontMetrics, UnderlineMetrics};

fn scale_i16(value: i16, scale: f32) -> i16 {
    (value as f32 * scale).round() as i16
}

/// Parsed face data needed for measuring and embedding.
pub(crate) struct TrueTypeFace {
    pub postscript_name: Option<String>,
    pub metrics: FontMetrics,
}

pub(crate) fn parse(name: &str, data: &[u8]) -> Result<TrueTypeFace, TextError> {
    let face = ttf_parser::Face::parse(data, 0).map_err(|e| TextError::Parse {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    let units_per_em = face.units_per_em().max(1);
    let scale = 1000.0 / units_per_em as f32;

    let widths: Vec<u16> = (32u8..=255)
        .map(|code| {
            char::from_u32(code as u32)
                .and_then(|ch| face.glyph_index(ch))
                .and_then(|id| face.glyph_hor_advance(id))
                .map(|advance| (advance as f32 * scale).round().clamp(0.0, u16::MAX as f32) as u16)
                .unwrap_or(0)
        })
        .collect();
    let missing_width = widths.first().copied().unwrap_or(0);

    let ascender = scale_i16(face.ascender(), scale);
    let bbox = face.global_bounding_box();

    let postscript_name = face
        .names()
        .into_iter()
        .filter(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
        .find_map(|n| n.to_string());

    Ok(TrueTypeFace {
        postscript_name,
        metrics: FontMetrics {
            widths,
            missing_width,
            ascender,
            descender: scale_i16(face.descender(), scale),
            cap_height: face
                .capital_height()
                .map(|value| scale_i16(value, scale))
                .unwrap_or(ascender),
            italic_angle: face.italic_angle().round() as i16,
            bbox: (
                scale_i16(bbox.x_min, scale),
                scale_i16(bbox.y_min, scale),
                scale_i16(bbox.x_max, scale),
                scale_i16(bbox.y_max, scale),
            ),
            underline: face.underline_metrics().map(|m| UnderlineMetrics {
                position: scale_i16(m.position, scale),
                thickness: scale_i16(m.thickness, scale),
            }),
            fixed_pitch: face.is_monospaced(),
        },
    })
}

/// PDF names may not contain whitespace or delimiters.
pub(crate) fn sanitize_font_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect()
}
