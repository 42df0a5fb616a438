//! The flowing document: page lifecycle, cursor, header/footer bands and the
//! public writing API.

use crate::config::{DEFAULT_DATE_FORMAT, DocumentConfig};
use crate::error::FlowError;
use crate::header_footer::{Band, Fields, ImageBlock, TextBlock};
use chrono::{Local, NaiveDate};
use quire_layout::pagination::{EPSILON, fits, needs_break};
use quire_layout::{FlowTarget, LayoutError, Table};
use quire_render_core::{
    Canvas, DocumentInfo, DocumentRenderer, ImageResource, Page, RenderDocument,
};
use quire_render_lopdf::LopdfRenderer;
use quire_style::{Cascade, DocumentDefaults, StyleOptions};
use quire_text::{FontSource, TextManager, line_box_height, write_text_line};
use quire_types::{Length, Rect};
use std::fmt::Write;
use std::path::Path;

const DEFAULT_RULE_THICKNESS_PT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Building,
    Finalized,
}

/// A document that pages itself as content is written.
///
/// The cursor is the top-left corner of the next line box in PDF user space
/// (origin bottom-left), so flowing down decreases `cursor_y`. Nothing is
/// drawn below `lowest_y`, which sits above the bottom margin and the space
/// reserved for footers.
///
/// The first page is created on the first write, so bands added before that
/// appear on every page.
#[derive(Debug)]
pub struct FlowDocument {
    config: DocumentConfig,
    text: TextManager,
    title: String,
    author: String,
    date: NaiveDate,
    pages: Vec<Page>,
    images: Vec<ImageResource>,
    header: Band,
    footer: Band,
    cursor_x: f32,
    cursor_y: f32,
    /// Where content starts on the current page, below the header bands.
    page_top: f32,
    lowest_y: f32,
    state: DocumentState,
}

impl FlowDocument {
    /// Registers the configured font sets; their files are read on first use.
    pub fn new(config: DocumentConfig) -> Self {
        let mut text = TextManager::new();
        for (key, set) in &config.font_sets {
            let [normal, bold, italic, bold_italic] = set.sources();
            text.define_font_set(key.as_str(), normal, bold, italic, bold_italic);
        }

        let mut document = Self {
            config,
            text,
            title: String::new(),
            author: String::new(),
            date: Local::now().date_naive(),
            pages: Vec::new(),
            images: Vec::new(),
            header: Band::default(),
            footer: Band::default(),
            cursor_x: 0.0,
            cursor_y: 0.0,
            page_top: 0.0,
            lowest_y: 0.0,
            state: DocumentState::Building,
        };
        let area = document.content_area();
        document.cursor_x = area.x;
        document.cursor_y = area.y + area.height;
        document.page_top = document.cursor_y;
        document.lowest_y = area.y;
        document
    }

    pub fn define_font_set(
        &mut self,
        key: impl Into<String>,
        normal: FontSource,
        bold: FontSource,
        italic: FontSource,
        bold_italic: FontSource,
    ) {
        self.text.define_font_set(key, normal, bold, italic, bold_italic);
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn set_author(&mut self, author: impl Into<String>) -> &mut Self {
        self.author = author.into();
        self
    }

    pub fn set_date(&mut self, date: NaiveDate) -> &mut Self {
        self.date = date;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn defaults(&self) -> &DocumentDefaults {
        &self.config.defaults
    }

    pub fn text_manager(&self) -> &TextManager {
        &self.text
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cursor(&self) -> (f32, f32) {
        (self.cursor_x, self.cursor_y)
    }

    /// The page area inside the margins, in points.
    pub fn content_area(&self) -> Rect {
        let (width, height) = self.config.page_size.dimensions_pt();
        let margins = &self.config.margins;
        Rect::new(
            margins.left.pt(),
            margins.bottom.pt(),
            (width - margins.horizontal_pt()).max(0.0),
            (height - margins.vertical_pt()).max(0.0),
        )
    }

    fn ensure_writable(&mut self) -> Result<(), FlowError> {
        if self.state == DocumentState::Finalized {
            return Err(FlowError::Finalized);
        }
        if self.pages.is_empty() {
            self.start_page();
        }
        Ok(())
    }

    fn formatted_date(&self) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.date.format(&self.config.date_format)).is_err() {
            log::warn!(
                "Invalid date format '{}', using '{}'",
                self.config.date_format,
                DEFAULT_DATE_FORMAT
            );
            out = self.date.format(DEFAULT_DATE_FORMAT).to_string();
        }
        out
    }

    fn load_image(&mut self, path: &Path) -> Result<ImageResource, FlowError> {
        let name = format!("Im{}", self.images.len() + 1);
        let image = ImageResource::load(&name, path)?;
        log::debug!(
            "Loaded image {} ({}x{}) as {}",
            path.display(),
            image.width,
            image.height,
            name
        );
        self.images.push(image.clone());
        Ok(image)
    }

    /// Drawn on every page created from now on. A missing or undecodable file
    /// is an error.
    pub fn add_header_image(
        &mut self,
        path: impl AsRef<Path>,
        options: &StyleOptions,
    ) -> Result<(), FlowError> {
        let image = self.load_image(path.as_ref())?;
        let width = self.content_area().width;
        let block = ImageBlock::new(&image, options, &self.config.defaults, width);
        self.header.image = Some(block);
        Ok(())
    }

    pub fn add_footer_image(
        &mut self,
        path: impl AsRef<Path>,
        options: &StyleOptions,
    ) -> Result<(), FlowError> {
        let image = self.load_image(path.as_ref())?;
        let width = self.content_area().width;
        let block = ImageBlock::new(&image, options, &self.config.defaults, width);
        self.footer.image = Some(block);
        Ok(())
    }

    /// Header text with `{{author}}`, `{{date}}`, `{{pageNumber}}`, `{{title}}`
    /// and `{{totalPages}}` tokens, drawn when the document is finalized. Its
    /// height is reserved on every page created from now on, and only those
    /// pages show it. `{{totalPages}}` still counts every page.
    pub fn add_header_text(
        &mut self,
        template: impl Into<String>,
        options: StyleOptions,
    ) -> Result<(), FlowError> {
        self.header.text = Some(self.text_block(template.into(), options)?);
        Ok(())
    }

    pub fn add_footer_text(
        &mut self,
        template: impl Into<String>,
        options: StyleOptions,
    ) -> Result<(), FlowError> {
        self.footer.text = Some(self.text_block(template.into(), options)?);
        Ok(())
    }

    fn text_block(&self, template: String, options: StyleOptions) -> Result<TextBlock, FlowError> {
        let date = self.formatted_date();
        let fields = Fields {
            title: &self.title,
            author: &self.author,
            date: &date,
            page_number: self.pages.len(),
            total_pages: self.pages.len(),
        };
        let width = self.content_area().width;
        Ok(TextBlock::new(
            template,
            options,
            &self.text,
            &self.config.defaults,
            &fields,
            width,
            self.pages.len(),
        )?)
    }

    /// Appends a page, draws the band images and reserves the band text space.
    fn start_page(&mut self) {
        let (width, height) = self.config.page_size.dimensions_pt();
        let area = self.content_area();
        let mut page = Page::new(width, height);

        let mut top = area.y + area.height;
        if let Some(image) = &self.header.image {
            image.draw(&mut page.content, area.x, area.width, top - image.height);
        }
        top -= self.header.image_height() + self.header.text_height();

        let mut bottom = area.y + self.footer.text_height();
        if let Some(image) = &self.footer.image {
            image.draw(&mut page.content, area.x, area.width, bottom);
        }
        bottom += self.footer.image_height();

        self.pages.push(page);
        self.cursor_x = area.x;
        self.cursor_y = top;
        self.page_top = top;
        self.lowest_y = bottom;
        log::debug!(
            "Started page {} (content from {:.2} down to {:.2})",
            self.pages.len(),
            top,
            bottom
        );
    }

    /// Starts a new page of the same size with the cursor at its top.
    pub fn new_page(&mut self) -> Result<(), FlowError> {
        if self.state == DocumentState::Finalized {
            return Err(FlowError::Finalized);
        }
        self.start_page();
        Ok(())
    }

    /// Moves the cursor down `lines` default line pitches and back to the left
    /// margin. Returns `true` if that crossed the lowest line and a new page
    /// was started instead.
    pub fn move_down(&mut self, lines: f32) -> Result<bool, FlowError> {
        self.ensure_writable()?;
        let defaults = &self.config.defaults;
        let distance = lines * line_box_height(defaults.text_height.pt(), defaults.line_height);
        self.advance(distance)
    }

    fn advance(&mut self, distance: f32) -> Result<bool, FlowError> {
        if !fits(self.cursor_y, distance, self.lowest_y) {
            self.start_page();
            return Ok(true);
        }
        self.cursor_y -= distance;
        self.cursor_x = self.content_area().x;
        Ok(false)
    }

    /// Writes `text` inline, starting at the cursor. The cursor stays on the
    /// last line, right after the text. Continuation lines of wrapped text
    /// start at the left margin.
    pub fn write(&mut self, text: &str, options: &StyleOptions) -> Result<(), FlowError> {
        self.flow_text(text, options, false)
    }

    /// Like [`write`](Self::write), then ends the line: the cursor moves below
    /// it and back to the left margin.
    pub fn write_line(&mut self, text: &str, options: &StyleOptions) -> Result<(), FlowError> {
        self.flow_text(text, options, true)
    }

    fn flow_text(
        &mut self,
        text: &str,
        options: &StyleOptions,
        end_line: bool,
    ) -> Result<(), FlowError> {
        self.ensure_writable()?;
        let style = Cascade::single(options, &self.config.defaults).resolve();
        let area = self.content_area();
        let right = match style.max_width {
            Some(limit) if limit.pt() > 0.0 => (area.x + limit.pt()).min(area.x + area.width),
            _ => area.x + area.width,
        };

        let text_height = style.text_height.pt();
        let pitch = line_box_height(text_height, style.line_height);
        let first_width = (right - self.cursor_x).max(0.0);
        let full_width = (right - area.x).max(0.0);
        let prepared = self.text.prepare_text_after(
            text,
            first_width,
            full_width,
            text_height,
            &style.font,
            style.style,
        )?;
        let baseline_offset = prepared.baseline_offset(text_height, style.line_height);

        for (i, line) in prepared.lines.iter().enumerate() {
            if i > 0 {
                self.advance(pitch)?;
            }
            if needs_break(self.cursor_y, pitch, self.lowest_y, self.at_page_top()) {
                self.start_page();
            }
            let slot = (right - self.cursor_x).max(0.0);
            let baseline = self.cursor_y - baseline_offset;
            let x = self.cursor_x;
            let start = write_text_line(self.canvas(), line, &prepared, x, baseline, slot, &style);
            self.cursor_x = start + prepared.font.measure(line, prepared.font_size);
        }

        if end_line {
            self.advance(pitch)?;
        }
        Ok(())
    }

    /// A horizontal rule across the content width (or the options' max width),
    /// `border_thickness.top` thick, with `margin.top`/`margin.bottom` of space
    /// around it. Zero thickness falls back to half a point.
    pub fn write_horizontal_line(&mut self, options: &StyleOptions) -> Result<(), FlowError> {
        self.ensure_writable()?;
        let style = Cascade::single(options, &self.config.defaults).resolve();
        let area = self.content_area();
        let width = style
            .max_width
            .map(|w| w.pt())
            .filter(|w| *w > 0.0)
            .map_or(area.width, |w| w.min(area.width));
        let thickness = match style.border_thickness.top.pt() {
            t if t > 0.0 => t,
            _ => DEFAULT_RULE_THICKNESS_PT,
        };
        let height = style.margin.top.pt() + thickness + style.margin.bottom.pt();
        if needs_break(self.cursor_y, height, self.lowest_y, self.at_page_top()) {
            self.start_page();
        }

        let y = self.cursor_y - style.margin.top.pt() - thickness / 2.0;
        let x = area.x;
        let color = style.border_color;
        self.canvas().line((x, y), (x + width, y), thickness, color);
        self.cursor_y -= height;
        self.cursor_x = area.x;
        Ok(())
    }

    /// Places an image `width` wide at the left margin, keeping its aspect
    /// ratio, and moves the cursor below it.
    pub fn write_image(&mut self, path: impl AsRef<Path>, width: Length) -> Result<(), FlowError> {
        self.ensure_writable()?;
        let image = self.load_image(path.as_ref())?;
        let area = self.content_area();
        let width = width.pt().min(area.width);
        let height = image.height_for_width(width);
        if needs_break(self.cursor_y, height, self.lowest_y, self.at_page_top()) {
            self.start_page();
        }

        let bottom = self.cursor_y - height;
        let x = area.x;
        self.canvas().image(&image.name, x, bottom, width, height);
        self.cursor_y = bottom;
        self.cursor_x = area.x;
        Ok(())
    }

    /// Builds a table with `populate`, then measures it against the content
    /// width and flows it from the cursor, repeating header rows on every page
    /// it spans. Returns the written table.
    pub fn write_table<F>(
        &mut self,
        options: StyleOptions,
        populate: F,
    ) -> Result<Table, FlowError>
    where
        F: FnOnce(&mut Table) -> Result<(), LayoutError>,
    {
        self.ensure_writable()?;
        let mut table = Table::new(options);
        populate(&mut table)?;

        let area = self.content_area();
        table.prepare(&self.text, &self.config.defaults, area.width)?;
        table.write(self, area.x)?;
        self.cursor_x = area.x;
        Ok(table)
    }

    /// Draws header and footer text on every page with the final page count.
    /// Runs once; later calls do nothing.
    pub fn finalize(&mut self) -> Result<(), FlowError> {
        if self.state == DocumentState::Finalized {
            return Ok(());
        }
        if self.pages.is_empty() {
            self.start_page();
        }

        let area = self.content_area();
        let date = self.formatted_date();
        let total_pages = self.pages.len();
        let header_top = area.y + area.height - self.header.image_height();
        let footer_top = area.y + self.footer.text_height();

        for (index, page) in self.pages.iter_mut().enumerate() {
            let fields = Fields {
                title: &self.title,
                author: &self.author,
                date: &date,
                page_number: index + 1,
                total_pages,
            };
            if let Some(block) = self.header.text_for_page(index) {
                block.draw(
                    &mut page.overlay,
                    &self.text,
                    &self.config.defaults,
                    &fields,
                    area.x,
                    header_top,
                    area.width,
                )?;
            }
            if let Some(block) = self.footer.text_for_page(index) {
                block.draw(
                    &mut page.overlay,
                    &self.text,
                    &self.config.defaults,
                    &fields,
                    area.x,
                    footer_top,
                    area.width,
                )?;
            }
        }

        self.state = DocumentState::Finalized;
        log::debug!("Finalized document with {} page(s)", total_pages);
        Ok(())
    }

    /// Finalizes and renders the whole document in memory.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, FlowError> {
        self.finalize()?;
        let fonts = self.text.embedded_fonts()?;
        let info = DocumentInfo {
            title: (!self.title.is_empty()).then(|| self.title.clone()),
            author: (!self.author.is_empty()).then(|| self.author.clone()),
            creation_date: Some(Local::now().format("D:%Y%m%d%H%M%S").to_string()),
        };
        let bytes = LopdfRenderer::new().render(RenderDocument {
            pages: &self.pages,
            fonts: &fonts,
            images: &self.images,
            info: &info,
        })?;
        Ok(bytes)
    }

    /// Writes the finished PDF to `path`. The file is only created once the
    /// whole document rendered. With `open_after_save` the platform viewer is
    /// launched; failing to launch it is only logged.
    pub fn save_to_file(
        &mut self,
        path: impl AsRef<Path>,
        open_after_save: bool,
    ) -> Result<(), FlowError> {
        let path = path.as_ref();
        let bytes = self.save_to_bytes()?;
        std::fs::write(path, &bytes)?;
        log::info!(
            "Wrote {} ({} bytes, {} page(s))",
            path.display(),
            bytes.len(),
            self.pages.len()
        );

        if open_after_save {
            if let Err(e) = open::that(path) {
                log::warn!("Could not open {} in a viewer: {}", path.display(), e);
            }
        }
        Ok(())
    }
}

impl FlowTarget for FlowDocument {
    fn at_page_top(&self) -> bool {
        self.cursor_y >= self.page_top - EPSILON
    }

    fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    fn set_cursor_y(&mut self, y: f32) {
        self.cursor_y = y;
    }

    fn lowest_y(&self) -> f32 {
        self.lowest_y
    }

    fn new_page(&mut self) -> Result<(), LayoutError> {
        self.start_page();
        Ok(())
    }

    fn canvas(&mut self) -> &mut Canvas {
        if self.pages.is_empty() {
            self.start_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last].content
    }
}
