//! Header and footer bands: an optional image drawn when a page is created and
//! an optional text block drawn at finalize, once the page count is known.

use quire_render_core::{Canvas, ImageResource};
use quire_style::{Cascade, DocumentDefaults, StyleOptions};
use quire_text::{PreparedText, TextError, TextManager, line_box_height, write_text_line};
use quire_types::Alignment;

/// Values for the `{{...}}` tokens of a header or footer template.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub date: &'a str,
    pub page_number: usize,
    pub total_pages: usize,
}

/// Replaces `{{author}}`, `{{date}}`, `{{pageNumber}}`, `{{title}}` and
/// `{{totalPages}}`. Anything else is left as written.
pub fn substitute(template: &str, fields: &Fields<'_>) -> String {
    template
        .replace("{{author}}", fields.author)
        .replace("{{date}}", fields.date)
        .replace("{{pageNumber}}", &fields.page_number.to_string())
        .replace("{{title}}", fields.title)
        .replace("{{totalPages}}", &fields.total_pages.to_string())
}

#[derive(Debug, Clone)]
pub(crate) struct TextBlock {
    template: String,
    options: StyleOptions,
    /// Vertical space kept free on every page.
    pub reserved_height: f32,
    /// Index of the first page that reserved the block.
    pub first_page: usize,
}

impl TextBlock {
    /// Measures the template with page numbers stood in by four digits, which
    /// is the space every page from `first_page` on reserves for the block.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        template: impl Into<String>,
        options: StyleOptions,
        text: &TextManager,
        defaults: &DocumentDefaults,
        fields: &Fields<'_>,
        width: f32,
        first_page: usize,
    ) -> Result<Self, TextError> {
        let mut block = Self {
            template: template.into(),
            options,
            reserved_height: 0.0,
            first_page,
        };
        let sample = Fields {
            page_number: 9999,
            total_pages: 9999,
            ..*fields
        };
        block.reserved_height = block.layout(text, defaults, &sample, width, |_, _| {})?;
        Ok(block)
    }

    /// Draws the block with its top edge at `top` inside `[x, x + width]`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        text: &TextManager,
        defaults: &DocumentDefaults,
        fields: &Fields<'_>,
        x: f32,
        top: f32,
        width: f32,
    ) -> Result<(), TextError> {
        let style = Cascade::single(&self.options, defaults).resolve();
        let left = x + style.margin.left.pt();
        self.layout(text, defaults, fields, width, |offset, draw: LineDraw<'_>| {
            write_text_line(
                canvas,
                draw.line,
                draw.prepared,
                left,
                top - offset,
                draw.usable_width,
                &style,
            );
        })?;
        Ok(())
    }

    /// Wraps the substituted template and reports each line's baseline depth
    /// below the block's top. Returns the block height.
    fn layout<F>(
        &self,
        text: &TextManager,
        defaults: &DocumentDefaults,
        fields: &Fields<'_>,
        width: f32,
        mut visit: F,
    ) -> Result<f32, TextError>
    where
        F: FnMut(f32, LineDraw<'_>),
    {
        let style = Cascade::single(&self.options, defaults).resolve();
        let usable_width = (width - style.margin.horizontal_pt()).max(0.0);
        let text_height = style.text_height.pt();
        let prepared = text.prepare_text(
            &substitute(&self.template, fields),
            usable_width,
            text_height,
            &style.font,
            style.style,
        )?;

        let pitch = line_box_height(text_height, style.line_height);
        let baseline_offset = prepared.baseline_offset(text_height, style.line_height);
        for (i, line) in prepared.lines.iter().enumerate() {
            let depth = style.margin.top.pt() + i as f32 * pitch + baseline_offset;
            visit(
                depth,
                LineDraw {
                    line,
                    prepared: &prepared,
                    usable_width,
                },
            );
        }
        Ok(prepared.height(text_height, style.line_height) + style.margin.vertical_pt())
    }
}

struct LineDraw<'a> {
    line: &'a str,
    prepared: &'a PreparedText,
    usable_width: f32,
}

/// A decoded image placed on every page.
#[derive(Debug, Clone)]
pub(crate) struct ImageBlock {
    pub name: String,
    pub width: f32,
    pub height: f32,
    alignment: Alignment,
}

impl ImageBlock {
    /// Sized from the options' `max_width` (or the full `content_width`) with
    /// the aspect ratio kept, positioned by their alignment.
    pub fn new(
        image: &ImageResource,
        options: &StyleOptions,
        defaults: &DocumentDefaults,
        content_width: f32,
    ) -> Self {
        let style = Cascade::single(options, defaults).resolve();
        let width = style
            .max_width
            .map(|w| w.pt())
            .filter(|w| *w > 0.0)
            .map_or(content_width, |w| w.min(content_width));
        Self {
            name: image.name.clone(),
            width,
            height: image.height_for_width(width),
            alignment: style.alignment,
        }
    }

    /// Draws the image with its bottom edge at `bottom`.
    pub fn draw(&self, canvas: &mut Canvas, left: f32, content_width: f32, bottom: f32) {
        let x = match self.alignment {
            Alignment::Left => left,
            Alignment::Center => left + (content_width - self.width) / 2.0,
            Alignment::Right => left + content_width - self.width,
        };
        canvas.image(&self.name, x, bottom, self.width, self.height);
    }
}

/// One header or footer.
#[derive(Debug, Clone, Default)]
pub(crate) struct Band {
    pub image: Option<ImageBlock>,
    pub text: Option<TextBlock>,
}

impl Band {
    pub fn image_height(&self) -> f32 {
        self.image.as_ref().map_or(0.0, |i| i.height)
    }

    /// The text block to draw on page `index`, if that page reserved one.
    pub fn text_for_page(&self, index: usize) -> Option<&TextBlock> {
        self.text.as_ref().filter(|t| index >= t.first_page)
    }

    pub fn text_height(&self) -> f32 {
        self.text.as_ref().map_or(0.0, |t| t.reserved_height)
    }
}
