use clap::Parser;
use quire::{
    ConfigError, DocumentConfig, FlowDocument, FlowError, FourSides, Length, RowSpec,
    StyleFlags, StyleOptions,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Renders a tabular JSON report to PDF.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Report data: `{ "title", "author", "columns", "header", "rows" }`
    report: PathBuf,

    /// Output PDF file
    #[arg(short, long, default_value = "report.pdf")]
    output: PathBuf,

    /// Document configuration (page size, margins, defaults, font sets)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Open the PDF in the system viewer once written
    #[arg(long, default_value_t = false)]
    open: bool,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct Report {
    title: String,
    author: String,
    columns: Vec<ReportColumn>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Deserialize, Debug)]
struct ReportColumn {
    name: String,
    #[serde(default)]
    options: StyleOptions,
}

fn main() -> Result<(), FlowError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "quire=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DocumentConfig::from_file(path)?,
        None => DocumentConfig::default(),
    };
    let report: Report =
        serde_json::from_str(&fs::read_to_string(&args.report)?).map_err(ConfigError::from)?;
    log::info!(
        "Rendering '{}' ({} columns, {} rows)",
        report.title,
        report.columns.len(),
        report.rows.len()
    );

    let mut doc = FlowDocument::new(config);
    doc.set_title(report.title.as_str())
        .set_author(report.author.as_str());

    let band = StyleOptions::new().margin(FourSides::all(Length::ZERO));
    doc.add_header_text("{{title}}", band.clone().style(StyleFlags::bold()))?;
    doc.add_footer_text("Page {{pageNumber}} of {{totalPages}}", band)?;

    doc.write_table(StyleOptions::new(), |table| {
        for column in &report.columns {
            table.add_column(column.name.as_str(), column.options.clone())?;
        }
        if !report.header.is_empty() {
            let header = row_spec(&report.columns, &report.header)
                .options(StyleOptions::new().style(StyleFlags::bold()));
            table.add_header_row(header)?;
        }
        for row in &report.rows {
            table.add_row(row_spec(&report.columns, row))?;
        }
        Ok(())
    })?;

    doc.save_to_file(&args.output, args.open)?;
    println!("Generated {}", args.output.display());
    Ok(())
}

/// Pairs values with columns by position. Extra values are dropped.
fn row_spec(columns: &[ReportColumn], values: &[String]) -> RowSpec {
    columns
        .iter()
        .zip(values)
        .fold(RowSpec::new(), |spec, (column, value)| {
            spec.cell(column.name.as_str(), value.as_str())
        })
}
