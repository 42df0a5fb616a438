//! Font and image objects.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use quire_render_core::{FontMetrics, FontProgram, FontResource, ImageResource};

const FIRST_CHAR: i64 = 32;
const LAST_CHAR: i64 = 255;

const FLAG_FIXED_PITCH: i64 = 1;
const FLAG_NONSYMBOLIC: i64 = 32;
const FLAG_ITALIC: i64 = 64;

/// Adds the font dictionary (plus descriptor and program for embedded fonts)
/// and returns the id to reference from the resource dictionary.
pub(crate) fn add_font(doc: &mut Document, font: &FontResource) -> ObjectId {
    match &font.program {
        FontProgram::Builtin => doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font.clone(),
            "Encoding" => "WinAnsiEncoding",
        }),
        FontProgram::TrueType { data, metrics } => {
            let file_id = doc.add_object(Stream::new(
                dictionary! { "Length1" => data.len() as i64 },
                data.as_ref().clone(),
            ));
            let descriptor_id = doc.add_object(font_descriptor(&font.base_font, metrics, file_id));
            let widths: Vec<Object> = metrics.widths.iter().map(|w| (*w as i64).into()).collect();
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "TrueType",
                "BaseFont" => font.base_font.clone(),
                "FirstChar" => FIRST_CHAR,
                "LastChar" => LAST_CHAR,
                "Widths" => widths,
                "FontDescriptor" => descriptor_id,
                "Encoding" => "WinAnsiEncoding",
            })
        }
    }
}

fn font_descriptor(base_font: &str, metrics: &FontMetrics, file_id: ObjectId) -> Dictionary {
    let mut flags = FLAG_NONSYMBOLIC;
    if metrics.fixed_pitch {
        flags |= FLAG_FIXED_PITCH;
    }
    if metrics.italic_angle != 0 {
        flags |= FLAG_ITALIC;
    }
    let (x_min, y_min, x_max, y_max) = metrics.bbox;

    dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => base_font.to_string(),
        "Flags" => flags,
        "FontBBox" => vec![
            (x_min as i64).into(),
            (y_min as i64).into(),
            (x_max as i64).into(),
            (y_max as i64).into(),
        ],
        "ItalicAngle" => metrics.italic_angle as i64,
        "Ascent" => metrics.ascender as i64,
        "Descent" => metrics.descender as i64,
        "CapHeight" => metrics.cap_height as i64,
        "StemV" => 80,
        "MissingWidth" => metrics.missing_width as i64,
        "FontFile2" => file_id,
    }
}

/// Adds an RGB image XObject; an alpha channel becomes a grayscale soft mask.
pub(crate) fn add_image(doc: &mut Document, image: &ImageResource) -> ObjectId {
    let mut dict = image_dict(image, "DeviceRGB");
    if let Some(alpha) = &image.alpha {
        let mask_id = doc.add_object(Stream::new(image_dict(image, "DeviceGray"), alpha.clone()));
        dict.set("SMask", mask_id);
    }
    doc.add_object(Stream::new(dict, image.rgb.clone()))
}

fn image_dict(image: &ImageResource, color_space: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => color_space.to_string(),
        "BitsPerComponent" => 8,
    }
}
