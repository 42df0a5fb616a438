//! Metrics for the standard Times faces, so text can be measured without any
//! font file on disk.

use crate::source::Face;
use quire_render_core::{FontMetrics, UnderlineMetrics};

#[rustfmt::skip]
const ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

#[rustfmt::skip]
const BOLD_ITALIC: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    832, 667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333, 278, 333, 570, 500,
    333, 500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778, 556, 500,
    500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];

struct FaceInfo {
    base_font: &'static str,
    ascii: &'static [u16; 95],
    cap_height: i16,
    italic_angle: i16,
    bbox: (i16, i16, i16, i16),
    /// Widths for glyphs with no ASCII base letter (Æ, ×, ß, ...).
    fallback: u16,
}

fn face_info(face: Face) -> FaceInfo {
    match face {
        Face::Regular => FaceInfo {
            base_font: "Times-Roman",
            ascii: &ROMAN,
            cap_height: 662,
            italic_angle: 0,
            bbox: (-168, -218, 1000, 898),
            fallback: 500,
        },
        Face::Bold => FaceInfo {
            base_font: "Times-Bold",
            ascii: &BOLD,
            cap_height: 676,
            italic_angle: 0,
            bbox: (-168, -218, 1000, 935),
            fallback: 556,
        },
        Face::Italic => FaceInfo {
            base_font: "Times-Italic",
            ascii: &ITALIC,
            cap_height: 653,
            italic_angle: -15,
            bbox: (-169, -217, 1010, 883),
            fallback: 500,
        },
        Face::BoldItalic => FaceInfo {
            base_font: "Times-BoldItalic",
            ascii: &BOLD_ITALIC,
            cap_height: 669,
            italic_angle: -15,
            bbox: (-200, -218, 996, 921),
            fallback: 500,
        },
    }
}

/// Latin-1 letters measure like their unaccented base letter.
fn base_letter(code: u8) -> Option<u8> {
    let base = match code {
        0xC0..=0xC5 => b'A',
        0xC7 => b'C',
        0xC8..=0xCB => b'E',
        0xCC..=0xCF => b'I',
        0xD0 => b'D',
        0xD1 => b'N',
        0xD2..=0xD6 | 0xD8 => b'O',
        0xD9..=0xDC => b'U',
        0xDD => b'Y',
        0xE0..=0xE5 => b'a',
        0xE7 => b'c',
        0xE8..=0xEB => b'e',
        0xEC..=0xEF => b'i',
        0xF1 => b'n',
        0xF2..=0xF6 | 0xF8 => b'o',
        0xF9..=0xFC => b'u',
        0xFD | 0xFF => b'y',
        0xA0 => b' ',
        0xAD => b'-',
        _ => return None,
    };
    Some(base)
}

pub(crate) fn base_font(face: Face) -> &'static str {
    face_info(face).base_font
}

pub(crate) fn metrics(face: Face) -> FontMetrics {
    let info = face_info(face);
    let widths = (32u8..=255)
        .map(|code| {
            let lookup = if code <= 126 { Some(code) } else { base_letter(code) };
            lookup
                .map(|c| info.ascii[(c - 32) as usize])
                .unwrap_or(info.fallback)
        })
        .collect();

    FontMetrics {
        widths,
        missing_width: info.fallback,
        ascender: 683,
        descender: -217,
        cap_height: info.cap_height,
        italic_angle: info.italic_angle,
        bbox: info.bbox,
        underline: Some(UnderlineMetrics {
            position: -100,
            thickness: 50,
        }),
        fixed_pitch: false,
    }
}
