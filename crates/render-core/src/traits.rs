use crate::canvas::Page;
use crate::error::RenderError;
use crate::resources::{FontResource, ImageResource};

/// Values for the PDF `/Info` dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Already in PDF date syntax (`D:YYYYMMDDHHmmSS`).
    pub creation_date: Option<String>,
}

/// Everything a backend needs to produce the final file.
#[derive(Debug, Clone, Copy)]
pub struct RenderDocument<'a> {
    pub pages: &'a [Page],
    pub fonts: &'a [FontResource],
    pub images: &'a [ImageResource],
    pub info: &'a DocumentInfo,
}

/// A backend that serializes finished pages into a document byte stream.
pub trait DocumentRenderer {
    fn render(&self, document: RenderDocument<'_>) -> Result<Vec<u8>, RenderError>;
}
