pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use quire::{DocumentConfig, FlowDocument, FlowError};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Load a PDF previously written to disk
    pub fn from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of a single page (1-based)
    pub fn page_text(&self, page_num: u32) -> String {
        self.doc.extract_text(&[page_num]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Render a document built by `build` with the default A4 configuration
pub fn generate_pdf<F>(build: F) -> Result<GeneratedPdf, Box<dyn std::error::Error>>
where
    F: FnOnce(&mut FlowDocument) -> Result<(), FlowError>,
{
    generate_pdf_with_config(DocumentConfig::default(), build)
}

pub fn generate_pdf_with_config<F>(
    config: DocumentConfig,
    build: F,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>>
where
    F: FnOnce(&mut FlowDocument) -> Result<(), FlowError>,
{
    let mut doc = FlowDocument::new(config);
    build(&mut doc)?;
    let bytes = doc.save_to_bytes()?;
    GeneratedPdf::from_bytes(bytes)
}
