use crate::content::{PageContext, to_win_ansi};
use crate::objects::{add_font, add_image};
use crate::overlay::overlay_content;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};
use quire_render_core::{Canvas, DocumentInfo, DocumentRenderer, RenderDocument, RenderError};

const PRODUCER: &str = "quire";

/// Builds the whole document in memory with `lopdf` and serializes it.
///
/// Every page shares one resource dictionary. A page's overlay canvas, if it
/// has one, becomes a second content stream appended after the main one.
#[derive(Debug, Clone)]
pub struct LopdfRenderer {
    version: String,
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
        }
    }
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

fn encode(canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
    let mut ctx = PageContext::new();
    ctx.draw_canvas(canvas);
    let content: Content = ctx.finish();
    content
        .encode()
        .map_err(|e| RenderError::Pdf(format!("content stream encoding failed: {}", e)))
}

fn literal(value: &str) -> Object {
    Object::String(to_win_ansi(value), StringFormat::Literal)
}

fn info_dictionary(info: &DocumentInfo) -> Dictionary {
    let mut dict = dictionary! { "Producer" => literal(PRODUCER) };
    if let Some(title) = &info.title {
        dict.set("Title", literal(title));
    }
    if let Some(author) = &info.author {
        dict.set("Author", literal(author));
    }
    if let Some(date) = &info.creation_date {
        dict.set("CreationDate", literal(date));
    }
    dict
}

impl DocumentRenderer for LopdfRenderer {
    fn render(&self, document: RenderDocument<'_>) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version(self.version.as_str());
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in document.fonts {
            let font_id = add_font(&mut doc, font);
            fonts.set(font.name.as_bytes(), font_id);
        }
        let mut xobjects = Dictionary::new();
        for image in document.images {
            let image_id = add_image(&mut doc, image);
            xobjects.set(image.name.as_bytes(), image_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        });

        let mut page_ids = Vec::with_capacity(document.pages.len());
        for page in document.pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, encode(&page.content)?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
                "Contents" => vec![Object::Reference(content_id)],
                "Resources" => resources_id,
            });
            if !page.overlay.is_empty() {
                overlay_content(&mut doc, page_id, encode(&page.overlay)?)?;
            }
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().copied().map(Object::Reference).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(info_dictionary(document.info));
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::Pdf(format!("failed to serialize document: {}", e)))?;
        log::debug!(
            "Rendered {} page(s), {} font(s), {} image(s) into {} bytes",
            page_ids.len(),
            document.fonts.len(),
            document.images.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}
