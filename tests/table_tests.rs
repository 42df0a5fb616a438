mod common;

use common::{TestResult, generate_pdf};
use quire::{Cell, FourSides, Length, RowSpec, StyleOptions, TableState};

#[test]
fn test_basic_table() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pdf = generate_pdf(|doc| {
        doc.write_table(StyleOptions::new(), |table| {
            table.add_column("left", StyleOptions::new())?;
            table.add_column("right", StyleOptions::new())?;
            table.add_row(RowSpec::new().cell("left", "A").cell("right", "B"))?;
            table.add_row(RowSpec::new().cell("left", "C").cell("right", "D"))?;
            Ok(())
        })?;
        Ok(())
    })?;

    for cell in &["A", "B", "C", "D"] {
        assert_pdf_contains_text!(pdf, cell);
    }
    Ok(())
}

#[test]
fn test_header_rows_repeat_on_every_page() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pdf = generate_pdf(|doc| {
        let table = doc.write_table(StyleOptions::new(), |table| {
            table.add_column("item", StyleOptions::new())?;
            table.add_column("amount", StyleOptions::new().max_width(Length::from_mm(30.0)))?;
            table.add_header_row(
                RowSpec::new()
                    .cell("item", "Item heading")
                    .cell("amount", "Amount"),
            )?;
            for i in 0..120 {
                table.add_row(
                    RowSpec::new()
                        .cell("item", format!("Line item {:03}", i))
                        .cell("amount", format!("{}.00", i * 3)),
                )?;
            }
            Ok(())
        })?;
        assert_eq!(table.state(), TableState::Written);
        Ok(())
    })?;

    let pages = pdf.page_count();
    assert!(pages >= 2, "120 rows should span several pages, got {}", pages);
    for page in 1..=pages {
        let text = pdf.page_text(page as u32);
        assert_eq!(
            text.matches("Item heading").count(),
            1,
            "page {} should carry the header exactly once:\n{}",
            page,
            text
        );
    }
    assert_pdf_contains_text!(pdf, "Line item 000");
    assert_pdf_contains_text!(pdf, "Line item 119");
    Ok(())
}

#[test]
fn test_spanning_cell_and_text_after_table() -> TestResult {
    let pdf = generate_pdf(|doc| {
        doc.write_table(StyleOptions::new(), |table| {
            table.add_column("task", StyleOptions::new())?;
            table.add_column("owner", StyleOptions::new())?;
            table.add_column("hours", StyleOptions::new())?;
            table.add_row(
                RowSpec::new()
                    .cell("task", "Audit")
                    .cell("owner", "Kim")
                    .cell("hours", "7"),
            )?;
            table.add_row(
                RowSpec::new()
                    .cell("task", Cell::new("Total across all owners").span(2))
                    .cell("hours", "7"),
            )?;
            Ok(())
        })?;
        doc.write_line("After the table", &StyleOptions::new())?;
        Ok(())
    })?;

    assert_pdf_contains_text!(pdf, "Total across all owners");
    assert_pdf_contains_text!(pdf, "After the table");
    assert_pdf_page_count!(pdf, 1);
    Ok(())
}

#[test]
fn test_table_options_cascade_to_cells() -> TestResult {
    let pdf = generate_pdf(|doc| {
        let options = StyleOptions::new()
            .font("Courier")
            .margin(FourSides::all(Length::from_pt(2.0)));
        doc.write_table(options, |table| {
            table.add_column("only", StyleOptions::new())?;
            table.add_row(RowSpec::new().cell("only", "fallback font"))?;
            Ok(())
        })?;
        Ok(())
    })?;

    // Unknown font keys fall back to the builtin Times faces.
    assert_pdf_has_font!(pdf, "Times");
    assert_pdf_contains_text!(pdf, "fallback font");
    Ok(())
}
