use crate::error::TextError;
use quire_style::StyleFlags;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a font program comes from. Nothing is read until the face is first used.
#[derive(Debug, Clone)]
pub enum FontSource {
    File(PathBuf),
    Bytes(Arc<Vec<u8>>),
}

impl FontSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        FontSource::File(path.into())
    }

    pub fn bytes(data: Vec<u8>) -> Self {
        FontSource::Bytes(Arc::new(data))
    }

    pub(crate) fn load(&self) -> Result<Arc<Vec<u8>>, TextError> {
        match self {
            FontSource::File(path) => std::fs::read(path)
                .map(Arc::new)
                .map_err(|source| TextError::Io {
                    path: path.clone(),
                    source,
                }),
            FontSource::Bytes(data) => Ok(data.clone()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            FontSource::File(path) => path.display().to_string(),
            FontSource::Bytes(data) => format!("<{} bytes>", data.len()),
        }
    }
}

/// The four faces registered under one logical font key.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub normal: FontSource,
    pub bold: FontSource,
    pub italic: FontSource,
    pub bold_italic: FontSource,
}

impl FontSet {
    pub fn select(&self, face: Face) -> &FontSource {
        match face {
            Face::Regular => &self.normal,
            Face::Bold => &self.bold,
            Face::Italic => &self.italic,
            Face::BoldItalic => &self.bold_italic,
        }
    }
}

/// Font face selected by the bold/italic flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl From<StyleFlags> for Face {
    fn from(flags: StyleFlags) -> Self {
        match (flags.bold, flags.italic) {
            (false, false) => Face::Regular,
            (true, false) => Face::Bold,
            (false, true) => Face::Italic,
            (true, true) => Face::BoldItalic,
        }
    }
}
