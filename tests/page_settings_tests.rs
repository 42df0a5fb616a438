mod common;

use common::pdf_assertions::{count_images, get_page_dimensions};
use common::{TestResult, generate_pdf, generate_pdf_with_config};
use image::{Rgb, RgbImage};
use quire::{
    Alignment, DocumentConfig, FlowDocument, FlowError, FourSides, Length, PageSize,
    StyleOptions,
};

fn write_png(dir: &tempfile::TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let logo = RgbImage::from_pixel(width, height, Rgb([30, 60, 120]));
    logo.save(&path).unwrap();
    path
}

#[test]
fn test_default_page_is_a4() -> TestResult {
    let pdf = generate_pdf(|doc| doc.write_line("A4 page", &StyleOptions::new()))?;
    let (width, height) = get_page_dimensions(&pdf.doc, 1).ok_or("missing MediaBox")?;
    assert!((width - 595.28).abs() < 0.1, "width was {}", width);
    assert!((height - 841.89).abs() < 0.1, "height was {}", height);
    Ok(())
}

#[test]
fn test_page_size_from_config_json() -> TestResult {
    let config = DocumentConfig::from_json(r#"{ "pageSize": "Letter", "margins": "72pt" }"#)?;
    assert!(DocumentConfig::from_json(r#"{ "margins": "1in" }"#).is_err());
    assert_eq!(config.page_size, PageSize::Letter);

    let pdf = generate_pdf_with_config(config, |doc| {
        doc.write_line("First page", &StyleOptions::new())?;
        doc.new_page()?;
        doc.write_line("Second page", &StyleOptions::new())
    })?;
    assert_pdf_page_count!(pdf, 2);
    assert_eq!(get_page_dimensions(&pdf.doc, 2), Some((612.0, 792.0)));
    Ok(())
}

#[test]
fn test_header_image_on_every_page_pushes_content_down() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let logo = write_png(&dir, "logo.png", 40, 20);

    let mut doc = FlowDocument::new(DocumentConfig::default());
    let options = StyleOptions::new()
        .max_width(Length::from_pt(100.0))
        .alignment(Alignment::Right);
    doc.add_header_image(&logo, &options)?;

    let line = StyleOptions::new().text_height(Length::from_pt(10.0)).line_height(1.0);
    doc.write_line("Below the logo", &line)?;
    let area = doc.content_area();
    let top = area.y + area.height;
    assert!((doc.cursor().1 - (top - 50.0 - 10.0)).abs() < 1e-3);

    doc.new_page()?;
    doc.write_line("Second page", &line)?;

    let pdf = common::GeneratedPdf::from_bytes(doc.save_to_bytes()?)?;
    assert_pdf_page_count!(pdf, 2);
    // Decoded once, referenced from both pages.
    assert_eq!(count_images(&pdf.doc), 1);
    assert_pdf_contains_text!(pdf, "Below the logo");
    Ok(())
}

#[test]
fn test_footer_image_and_inline_image() -> TestResult {
    let dir = tempfile::tempdir()?;
    let stamp = write_png(&dir, "stamp.png", 10, 10);
    let chart = write_png(&dir, "chart.png", 200, 100);

    let pdf = generate_pdf(|doc| {
        doc.add_footer_image(&stamp, &StyleOptions::new().max_width(Length::from_mm(10.0)))?;
        doc.write_line("Chart:", &StyleOptions::new())?;
        doc.write_image(&chart, Length::from_mm(80.0))?;
        let rule = StyleOptions::new().margin(FourSides::all(Length::from_pt(4.0)));
        doc.write_horizontal_line(&rule)?;
        doc.write_line("End of report", &StyleOptions::new())
    })?;

    assert_eq!(count_images(&pdf.doc), 2);
    assert_pdf_contains_text!(pdf, "End of report");
    Ok(())
}

#[test]
fn test_unreadable_image_is_reported() -> TestResult {
    let dir = tempfile::tempdir()?;
    let bogus = dir.path().join("broken.png");
    std::fs::write(&bogus, b"not a png")?;

    let mut doc = FlowDocument::new(DocumentConfig::default());
    let err = doc.write_image(&bogus, Length::from_mm(20.0)).unwrap_err();
    assert!(matches!(err, FlowError::Render(_)));
    Ok(())
}
