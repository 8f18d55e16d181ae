//! Command implementations.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use tracing::info;

use rsf_ingest::{ImportPayload, decode_rsf, parse_archive};
use rsf_integrate::{apply_records, apply_schedule};
use rsf_model::{Dataset, IntegrationReport, ValidationError, ValidationReport};
use rsf_validate::RuleEngine;

use crate::cli::{ImportArgs, SchemaArgs, ValidateArgs};

const REPORT_SCHEMA: &str = "rsf-engine.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct ValidationPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    file: Option<&'a str>,
    error_count: usize,
    errors: &'a [ValidationError],
}

fn payload(report: &ValidationReport) -> ValidationPayload<'_> {
    ValidationPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        file: report.file_name.as_deref(),
        error_count: report.error_count(),
        errors: report.errors(),
    }
}

fn load_dataset(path: &Path, year: u16) -> Result<Dataset> {
    let file =
        File::open(path).with_context(|| format!("failed to open RSF file {}", path.display()))?;
    let dataset = decode_rsf(BufReader::new(file), year)
        .with_context(|| format!("failed to decode RSF file {}", path.display()))?;
    info!(records = dataset.len(), file = %path.display(), "dataset decoded");
    Ok(dataset)
}

/// Returns true when the report contains errors.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let dataset = load_dataset(&args.file, args.year)?;
    let engine = RuleEngine::new(args.year)?;
    let mut report = engine.validate(&dataset);
    report.file_name = Some(args.file.display().to_string());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&payload(&report))?);
    } else {
        if report.has_errors() {
            print_validation_table(&report);
        }
        println!("{}", report.summary());
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&payload(&report))?;
        std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    Ok(report.has_errors())
}

/// Returns true when ingestion or integration reported errors.
pub fn run_import(args: &ImportArgs) -> Result<bool> {
    let mut dataset = load_dataset(&args.rsf_file, args.year)?;

    let bytes = std::fs::read(&args.archive)
        .with_context(|| format!("failed to read archive {}", args.archive.display()))?;
    let archive_name = args
        .archive
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.archive.display().to_string());

    let import = parse_archive(&bytes, &archive_name, args.year)?;
    let mut had_errors = import.report.has_errors();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&payload(&import.report))?);
    } else if import.report.has_errors() {
        print_validation_table(&import.report);
    }

    let integration = match import.payload {
        ImportPayload::None => {
            eprintln!("error: archive produced no usable workbook data");
            return Ok(true);
        }
        ImportPayload::Schedule(updates) => {
            info!(updates = updates.len(), rows = import.total_rows, "applying schedule updates");
            apply_schedule(&updates, &mut dataset)
        }
        ImportPayload::Records {
            record_type,
            records,
        } => {
            info!(%record_type, records = records.len(), rows = import.total_rows, "applying record import");
            apply_records(records, record_type, &mut dataset)
        }
    };
    had_errors |= integration.has_errors();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&integration)?);
    } else {
        print_integration_summary(&integration);
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&dataset)?;
        std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("failed to write dataset to {}", path.display()))?;
    }

    Ok(had_errors)
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schema = rsf_standards::year(args.year)?;
    for record in schema.iter() {
        println!(
            "record type {} ({} fields)",
            record.record_type,
            record.fields().len()
        );
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_header(["Field", "Start", "Length", "Kind", "Mandatory"]);
        for field in record.fields() {
            table.add_row([
                field.name.to_string(),
                field.start.to_string(),
                field.length.to_string(),
                format!("{:?}", field.kind),
                if field.mandatory { "yes" } else { "" }.to_string(),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}

fn print_validation_table(report: &ValidationReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(["Line", "Kind", "Field", "Message"]);
    for error in report.errors() {
        let line = match error.line {
            0 => "file".to_string(),
            -1 => "rule".to_string(),
            n => n.to_string(),
        };
        table.add_row([
            line,
            error.kind.to_string(),
            error.field.clone().unwrap_or_default(),
            error.message.clone(),
        ]);
    }
    println!("{table}");
}

fn print_integration_summary(report: &IntegrationReport) {
    println!(
        "processed {} update(s): {} added, {} updated, {} error(s)",
        report.total_processed,
        report.added,
        report.updated,
        report.errors.len()
    );
    for error in &report.errors {
        println!("  - {error}");
    }
}
