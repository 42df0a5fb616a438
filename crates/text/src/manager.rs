//! Font registry and embedding cache.
//!
//! Font sets are registered up front but nothing is read or parsed until a face
//! is first requested. The embedding cache is shared by all table cells being
//! prepared (possibly in parallel) and guarantees that each (key, face) pair is
//! loaded and given a resource name at most once.

use crate::builtin;
use crate::error::TextError;
use crate::source::{Face, FontSet, FontSource};
use crate::truetype;
use quire_render_core::{FontMetrics, FontProgram, FontResource};
use quire_style::StyleFlags;
use quire_style::defaults::BUILTIN_FONT_KEY;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// An embedded face, ready to measure with and draw in.
#[derive(Debug)]
pub struct PreparedFont {
    pub key: String,
    pub face: Face,
    /// Page resource name (`F1`, `F2`, ...).
    pub resource_name: String,
    pub base_font: String,
    pub metrics: Arc<FontMetrics>,
}

pub type FontHandle = Arc<PreparedFont>;

impl PreparedFont {
    /// Font size that makes ascender-to-descender exactly `text_height_pt` tall.
    pub fn size_for_height(&self, text_height_pt: f32) -> f32 {
        text_height_pt * 1000.0 / self.metrics.glyph_extent()
    }

    pub fn ascent_pt(&self, font_size: f32) -> f32 {
        self.metrics.ascender as f32 * font_size / 1000.0
    }

    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| self.metrics.advance(win_ansi_code(ch)) as u32)
            .sum();
        units as f32 * font_size / 1000.0
    }
}

/// Code in the single-byte encoding the fonts are written with.
pub(crate) fn win_ansi_code(ch: char) -> u8 {
    match ch as u32 {
        code @ 0..=255 => code as u8,
        _ => b'?',
    }
}

/// The result of laying out one string: the wrapped lines plus the font and size
/// they were measured with. Drawing must use exactly these values.
#[derive(Debug, Clone)]
pub struct PreparedText {
    pub lines: Vec<String>,
    pub font: FontHandle,
    pub font_size: f32,
}

impl PreparedText {
    /// Total height in points for `lines × text_height × line_height`.
    pub fn height(&self, text_height_pt: f32, line_height: f32) -> f32 {
        self.lines.len() as f32 * line_box_height(text_height_pt, line_height)
    }

    /// Distance from the top of a line box down to its baseline. The glyphs
    /// are centered vertically in the box.
    pub fn baseline_offset(&self, text_height_pt: f32, line_height: f32) -> f32 {
        let leading = (line_box_height(text_height_pt, line_height) - text_height_pt) / 2.0;
        leading + self.font.ascent_pt(self.font_size)
    }
}

/// Distance between two consecutive baselines.
pub fn line_box_height(text_height_pt: f32, line_height: f32) -> f32 {
    text_height_pt * line_height
}

#[derive(Debug, Default)]
struct EmbeddingCache {
    handles: HashMap<(String, Face), FontHandle>,
    /// Unique resources in embedding order.
    resources: Vec<FontResource>,
}

#[derive(Debug, Default)]
pub struct TextManager {
    font_sets: HashMap<String, FontSet>,
    cache: RwLock<EmbeddingCache>,
}

impl TextManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_font_set(
        &mut self,
        key: impl Into<String>,
        normal: FontSource,
        bold: FontSource,
        italic: FontSource,
        bold_italic: FontSource,
    ) {
        let key = key.into();
        log::debug!("Registering font set '{}'", key);
        self.font_sets.insert(
            key,
            FontSet {
                normal,
                bold,
                italic,
                bold_italic,
            },
        );
    }

    pub fn has_font_set(&self, key: &str) -> bool {
        self.font_sets.contains_key(key)
    }

    /// Returns the embedded face for `key` at the bold/italic style of `flags`.
    ///
    /// An unknown key falls back to the builtin serif family.
    pub fn get_font(&self, key: &str, flags: StyleFlags) -> Result<FontHandle, TextError> {
        let face = Face::from(flags.without_underline());
        let cache_key = (key.to_string(), face);

        {
            let cache = self.cache.read().map_err(|_| TextError::LockPoisoned)?;
            if let Some(handle) = cache.handles.get(&cache_key) {
                return Ok(handle.clone());
            }
        }

        let Some(set) = self.font_sets.get(key) else {
            if key == BUILTIN_FONT_KEY {
                return self.embed_builtin(face);
            }
            log::warn!(
                "Font '{}' is not registered, falling back to {}",
                key,
                builtin::base_font(face)
            );
            let handle = self.embed_builtin(face)?;
            let mut cache = self.cache.write().map_err(|_| TextError::LockPoisoned)?;
            cache.handles.entry(cache_key).or_insert_with(|| handle.clone());
            return Ok(handle);
        };

        let mut cache = self.cache.write().map_err(|_| TextError::LockPoisoned)?;
        // Another caller may have embedded it while we waited for the lock.
        if let Some(handle) = cache.handles.get(&cache_key) {
            return Ok(handle.clone());
        }

        let source = set.select(face);
        log::debug!("Embedding font '{}' {:?} from {}", key, face, source.describe());
        let data = source.load()?;
        let parsed = truetype::parse(key, &data)?;
        let resource_name = format!("F{}", cache.resources.len() + 1);
        let base_font = parsed
            .postscript_name
            .as_deref()
            .map(truetype::sanitize_font_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("{}-{:?}", truetype::sanitize_font_name(key), face));
        let metrics = Arc::new(parsed.metrics);

        cache.resources.push(FontResource {
            name: resource_name.clone(),
            base_font: base_font.clone(),
            program: FontProgram::TrueType {
                data,
                metrics: (*metrics).clone(),
            },
        });
        let handle = Arc::new(PreparedFont {
            key: key.to_string(),
            face,
            resource_name,
            base_font,
            metrics,
        });
        cache.handles.insert(cache_key, handle.clone());
        Ok(handle)
    }

    fn embed_builtin(&self, face: Face) -> Result<FontHandle, TextError> {
        let cache_key = (BUILTIN_FONT_KEY.to_string(), face);
        let mut cache = self.cache.write().map_err(|_| TextError::LockPoisoned)?;
        if let Some(handle) = cache.handles.get(&cache_key) {
            return Ok(handle.clone());
        }

        let resource_name = format!("F{}", cache.resources.len() + 1);
        let base_font = builtin::base_font(face).to_string();
        log::debug!("Using builtin font {} as {}", base_font, resource_name);
        cache.resources.push(FontResource {
            name: resource_name.clone(),
            base_font: base_font.clone(),
            program: FontProgram::Builtin,
        });
        let handle = Arc::new(PreparedFont {
            key: BUILTIN_FONT_KEY.to_string(),
            face,
            resource_name,
            base_font,
            metrics: Arc::new(builtin::metrics(face)),
        });
        cache.handles.insert(cache_key, handle.clone());
        Ok(handle)
    }

    pub fn measure_text(&self, text: &str, font: &PreparedFont, font_size: f32) -> f32 {
        font.measure(text, font_size)
    }

    /// Resolves the font, sizes it to `text_height_pt` and wraps `text` into
    /// lines no wider than `max_width` (points).
    ///
    /// Explicit `\n` always breaks. Otherwise words are added to a line while
    /// they fit; a single word wider than `max_width` stays on its own line.
    pub fn prepare_text(
        &self,
        text: &str,
        max_width: f32,
        text_height_pt: f32,
        font_key: &str,
        flags: StyleFlags,
    ) -> Result<PreparedText, TextError> {
        self.prepare_text_after(
            text,
            max_width,
            max_width,
            text_height_pt,
            font_key,
            flags,
        )
    }

    /// Like [`prepare_text`](Self::prepare_text), but the first line only has
    /// `first_width` left, as when text continues a line that already holds
    /// something.
    pub fn prepare_text_after(
        &self,
        text: &str,
        first_width: f32,
        max_width: f32,
        text_height_pt: f32,
        font_key: &str,
        flags: StyleFlags,
    ) -> Result<PreparedText, TextError> {
        let font = self.get_font(font_key, flags)?;
        let font_size = font.size_for_height(text_height_pt);

        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let paragraph = paragraph.trim_end_matches('\r');
            let width = if lines.is_empty() { first_width } else { max_width };
            if font.measure(paragraph, font_size) <= width {
                lines.push(paragraph.to_string());
                continue;
            }
            wrap_words(
                paragraph,
                width,
                max_width,
                |s| font.measure(s, font_size),
                &mut lines,
            );
        }

        Ok(PreparedText {
            lines,
            font,
            font_size,
        })
    }

    /// Every font embedded so far, in embedding order.
    pub fn embedded_fonts(&self) -> Result<Vec<FontResource>, TextError> {
        let cache = self.cache.read().map_err(|_| TextError::LockPoisoned)?;
        Ok(cache.resources.clone())
    }
}

fn wrap_words(
    paragraph: &str,
    first_width: f32,
    max_width: f32,
    measure: impl Fn(&str) -> f32,
    lines: &mut Vec<String>,
) {
    let mut width = first_width;
    let mut current = String::new();
    for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure(&candidate) <= width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            width = max_width;
        }
    }
    lines.push(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: f32 = 10.0;

    #[test]
    fn test_font_size_matches_glyph_height() {
        let manager = TextManager::new();
        let font = manager.get_font(BUILTIN_FONT_KEY, StyleFlags::REGULAR).unwrap();
        // Times ascender 683, descender -217.
        assert!((font.size_for_height(9.0) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_key_falls_back_to_builtin_style() {
        let manager = TextManager::new();
        let font = manager.get_font("missing", StyleFlags::bold()).unwrap();
        assert_eq!(font.base_font, "Times-Bold");

        // The fallback shares the builtin resource instead of adding another one.
        let direct = manager.get_font(BUILTIN_FONT_KEY, StyleFlags::bold()).unwrap();
        assert_eq!(direct.resource_name, font.resource_name);
        assert_eq!(manager.embedded_fonts().unwrap().len(), 1);
    }

    #[test]
    fn test_underline_does_not_select_a_face() {
        let manager = TextManager::new();
        let plain = manager.get_font(BUILTIN_FONT_KEY, StyleFlags::REGULAR).unwrap();
        let underlined = manager.get_font(BUILTIN_FONT_KEY, StyleFlags::underline()).unwrap();
        assert!(Arc::ptr_eq(&plain, &underlined));
    }

    #[test]
    fn test_concurrent_requests_embed_once() {
        let manager = TextManager::new();
        let names: Vec<String> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        manager
                            .get_font(BUILTIN_FONT_KEY, StyleFlags::italic())
                            .unwrap()
                            .resource_name
                            .clone()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert!(names.iter().all(|n| n == "F1"));
        assert_eq!(manager.embedded_fonts().unwrap().len(), 1);
    }

    fn fixture_font() -> Vec<u8> {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/Montserrat-Regular.ttf");
        std::fs::read(path).unwrap()
    }

    fn manager_with_fixture() -> TextManager {
        let data = fixture_font();
        let mut manager = TextManager::new();
        manager.define_font_set(
            "brand",
            FontSource::bytes(data.clone()),
            FontSource::bytes(data.clone()),
            FontSource::bytes(data.clone()),
            FontSource::bytes(data),
        );
        manager
    }

    #[test]
    fn test_truetype_set_is_embedded_once_under_contention() {
        let manager = manager_with_fixture();
        let handles: Vec<FontHandle> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| manager.get_font("brand", StyleFlags::REGULAR).unwrap()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));

        let resources = manager.embedded_fonts().unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "F1");
        assert!(matches!(resources[0].program, FontProgram::TrueType { .. }));
        assert!(!resources[0].base_font.starts_with("Times"));
        assert!(!resources[0].base_font.contains(' '));
    }

    #[test]
    fn test_truetype_measure_uses_font_advances() {
        let data = fixture_font();
        let face = ttf_parser::Face::parse(&data, 0).unwrap();
        let scale = 1000.0 / face.units_per_em() as f32;
        let advance = |ch: char| {
            let id = face.glyph_index(ch).unwrap();
            (face.glyph_hor_advance(id).unwrap() as f32 * scale).round()
        };

        let manager = manager_with_fixture();
        let font = manager.get_font("brand", StyleFlags::REGULAR).unwrap();
        let expected = advance('W') + advance('i') + advance('d') + advance('e');
        assert!((font.measure("Wide", 1000.0) - expected).abs() < 1e-3);

        let times = manager.get_font(BUILTIN_FONT_KEY, StyleFlags::REGULAR).unwrap();
        assert_ne!(font.measure("Wide", 12.0), times.measure("Wide", 12.0));
    }

    #[test]
    fn test_missing_font_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ttf");
        let mut manager = TextManager::new();
        manager.define_font_set(
            "brand",
            FontSource::file(&path),
            FontSource::file(&path),
            FontSource::file(&path),
            FontSource::file(&path),
        );
        let err = manager.get_font("brand", StyleFlags::REGULAR).unwrap_err();
        assert!(matches!(err, TextError::Io { .. }));
        assert!(manager.embedded_fonts().unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_a_single_line() {
        let manager = TextManager::new();
        let prepared = manager
            .prepare_text("Hours", 500.0, HEIGHT, BUILTIN_FONT_KEY, StyleFlags::REGULAR)
            .unwrap();
        assert_eq!(prepared.lines, vec!["Hours"]);
    }

    #[test]
    fn test_greedy_wrap_respects_width() {
        let manager = TextManager::new();
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let max_width = 80.0;
        let prepared = manager
            .prepare_text(text, max_width, HEIGHT, BUILTIN_FONT_KEY, StyleFlags::REGULAR)
            .unwrap();
        assert!(prepared.lines.len() > 1);
        for line in &prepared.lines {
            assert!(prepared.font.measure(line, prepared.font_size) <= max_width);
        }
        assert_eq!(prepared.lines.join(" "), text);
    }

    #[test]
    fn test_overlong_word_keeps_own_line() {
        let manager = TextManager::new();
        let prepared = manager
            .prepare_text(
                "a Supercalifragilisticexpialidocious b",
                30.0,
                HEIGHT,
                BUILTIN_FONT_KEY,
                StyleFlags::REGULAR,
            )
            .unwrap();
        assert_eq!(
            prepared.lines,
            vec!["a", "Supercalifragilisticexpialidocious", "b"]
        );
    }

    #[test]
    fn test_newline_forces_break() {
        let manager = TextManager::new();
        let prepared = manager
            .prepare_text("one\n\nthree", 500.0, HEIGHT, BUILTIN_FONT_KEY, StyleFlags::REGULAR)
            .unwrap();
        assert_eq!(prepared.lines, vec!["one", "", "three"]);
        assert_eq!(prepared.height(HEIGHT, 1.5), 45.0);
    }

    #[test]
    fn test_only_first_line_is_narrowed() {
        let manager = TextManager::new();
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda";
        let prepared = manager
            .prepare_text_after(text, 30.0, 120.0, HEIGHT, "Times", StyleFlags::REGULAR)
            .unwrap();
        let widths: Vec<f32> = prepared
            .lines
            .iter()
            .map(|line| prepared.font.measure(line, prepared.font_size))
            .collect();
        assert!(widths[0] <= 30.0);
        assert!(widths[1] > 30.0 && widths[1] <= 120.0);
        assert_eq!(prepared.lines.join(" "), text);
    }

    #[test]
    fn test_prepare_text_is_deterministic() {
        let manager = TextManager::new();
        let text = "Deterministic wrapping of a reasonably long sentence in a column";
        let first = manager
            .prepare_text(text, 60.0, HEIGHT, "body", StyleFlags::REGULAR)
            .unwrap();
        let second = manager
            .prepare_text(text, 60.0, HEIGHT, "body", StyleFlags::REGULAR)
            .unwrap();
        assert_eq!(first.lines, second.lines);
        assert_eq!(first.font_size, second.font_size);
    }
}
