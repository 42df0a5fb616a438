//! Document configuration, loadable from JSON.
//!
//! ```json
//! {
//!   "pageSize": "A4",
//!   "margins": "20mm 15mm",
//!   "defaults": { "textHeight": "3 mm", "lineHeight": 1.4 },
//!   "fontSets": { "Sans": { "normal": "fonts/Sans.ttf", "bold": "fonts/Sans-Bold.ttf" } },
//!   "dateFormat": "%Y-%m-%d"
//! }
//! ```

use crate::error::ConfigError;
use quire_style::DocumentDefaults;
use quire_text::FontSource;
use quire_types::{FourSides, Length, PageSize};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Files for one font-set key. Faces left out reuse `normal`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontSetConfig {
    pub normal: PathBuf,
    #[serde(default)]
    pub bold: Option<PathBuf>,
    #[serde(default)]
    pub italic: Option<PathBuf>,
    #[serde(default)]
    pub bold_italic: Option<PathBuf>,
}

impl FontSetConfig {
    /// Sources in normal, bold, italic, bold-italic order.
    pub fn sources(&self) -> [FontSource; 4] {
        let face = |path: &Option<PathBuf>| FontSource::file(path.as_ref().unwrap_or(&self.normal));
        [
            FontSource::file(&self.normal),
            face(&self.bold),
            face(&self.italic),
            face(&self.bold_italic),
        ]
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentConfig {
    pub page_size: PageSize,
    pub margins: FourSides<Length>,
    pub defaults: DocumentDefaults,
    pub font_sets: BTreeMap<String, FontSetConfig>,
    /// `chrono` format string used for `{{date}}`.
    pub date_format: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margins: FourSides::all(Length::from_mm(20.0)),
            defaults: DocumentDefaults::default(),
            font_sets: BTreeMap::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DocumentConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded document configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_types::Alignment;
    use std::io::Write;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config = DocumentConfig::from_json("{}").unwrap();
        assert_eq!(config, DocumentConfig::default());
        assert_eq!(config.date_format, "%d.%m.%Y");
    }

    #[test]
    fn test_lengths_and_shorthands() {
        let config = DocumentConfig::from_json(
            r#"{
                "pageSize": "Letter",
                "margins": "10mm 36pt",
                "defaults": { "textHeight": "9 pt", "alignment": "center", "margin": 0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.margins.top.mm(), 10.0);
        assert_eq!(config.margins.left.pt(), 36.0);
        assert_eq!(config.defaults.text_height.pt(), 9.0);
        assert_eq!(config.defaults.alignment, Alignment::Center);
        assert!(config.defaults.margin.top.is_zero());
        // Untouched fields keep their builtin values.
        assert_eq!(config.defaults.line_height, 1.5);
    }

    #[test]
    fn test_font_set_faces_default_to_normal() {
        let config = DocumentConfig::from_json(
            r#"{ "fontSets": { "Sans": { "normal": "a.ttf", "boldItalic": "d.ttf" } } }"#,
        )
        .unwrap();
        let set = &config.font_sets["Sans"];
        assert_eq!(set.bold, None);
        let [_, bold, _, bold_italic] = set.sources();
        assert!(matches!(bold, FontSource::File(path) if path == Path::new("a.ttf")));
        assert!(matches!(bold_italic, FontSource::File(path) if path == Path::new("d.ttf")));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "dateFormat": "%Y" }}"#).unwrap();
        let config = DocumentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.date_format, "%Y");

        let err = DocumentConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_length_is_rejected() {
        let err = DocumentConfig::from_json(r#"{ "margins": "10 PT" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
