mod common;

use common::{TestResult, generate_pdf};
use lopdf::Object;
use quire::{FontSource, StyleFlags, StyleOptions};

const FIXTURE_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/crates/text/tests/fixtures/Montserrat-Regular.ttf"
);

#[test]
fn test_registered_truetype_font_is_embedded() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pdf = generate_pdf(|doc| {
        doc.define_font_set(
            "Brand",
            FontSource::file(FIXTURE_FONT),
            FontSource::file(FIXTURE_FONT),
            FontSource::file(FIXTURE_FONT),
            FontSource::file(FIXTURE_FONT),
        );
        let brand = StyleOptions::new().font("Brand");
        doc.write_line("Embedded heading", &brand)?;
        doc.write_line("Same face again", &brand.clone().style(StyleFlags::underline()))
    })?;

    let fonts: Vec<_> = pdf
        .doc
        .objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| matches!(dict.get(b"Subtype").and_then(Object::as_name), Ok(b"TrueType")))
        .collect();
    // Underline does not pick another face, so one font program is embedded.
    assert_eq!(fonts.len(), 1);

    let font = fonts[0];
    assert_eq!(font.get(b"Widths")?.as_array()?.len(), 224);
    assert_eq!(font.get(b"FirstChar")?.as_i64()?, 32);
    let descriptor = pdf.doc.get_dictionary(font.get(b"FontDescriptor")?.as_reference()?)?;
    let program = pdf.doc.get_object(descriptor.get(b"FontFile2")?.as_reference()?)?.as_stream()?;
    assert_eq!(
        program.dict.get(b"Length1")?.as_i64()?,
        std::fs::metadata(FIXTURE_FONT)?.len() as i64
    );
    Ok(())
}

#[test]
fn test_missing_font_file_aborts_the_write() -> TestResult {
    let dir = tempfile::tempdir()?;
    let absent = dir.path().join("absent.ttf");

    let result = generate_pdf(|doc| {
        doc.define_font_set(
            "Brand",
            FontSource::file(&absent),
            FontSource::file(&absent),
            FontSource::file(&absent),
            FontSource::file(&absent),
        );
        doc.write_line("never drawn", &StyleOptions::new().font("Brand"))
    });
    assert!(result.is_err());
    Ok(())
}
