use super::Report;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        let json = render_json(report)?;
        emit(self.output_path.as_ref(), &json)
    }
}

/// Newline-delimited (kind, name, location) records for tooling
pub struct NdjsonReporter {
    output_path: Option<PathBuf>,
}

impl NdjsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        let ndjson = render_ndjson(report)?;
        emit(self.output_path.as_ref(), ndjson.trim_end())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    #[serde(flatten)]
    report: &'a Report,
    note: &'static str,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum RecordKind {
    Asset,
    Symbol,
    AssetCollision,
    SymbolCollision,
}

#[derive(Serialize)]
struct Record<'a> {
    kind: RecordKind,
    name: &'a str,
    location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

pub(super) fn render_json(report: &Report) -> Result<String> {
    let json = JsonReport {
        version: "1.0",
        report,
        note: super::TRANSITIVE_NOTE,
    };
    serde_json::to_string_pretty(&json).into_diagnostic()
}

pub(super) fn render_ndjson(report: &Report) -> Result<String> {
    let mut records = Vec::new();

    for collision in &report.asset_collisions {
        records.push(Record {
            kind: RecordKind::AssetCollision,
            name: &collision.name,
            location: None,
            count: Some(collision.count),
        });
    }
    for asset in &report.unreferenced_assets {
        records.push(Record {
            kind: RecordKind::Asset,
            name: &asset.name,
            location: asset.location.as_deref(),
            count: None,
        });
    }
    for collision in &report.symbol_collisions {
        records.push(Record {
            kind: RecordKind::SymbolCollision,
            name: &collision.name,
            location: Some(collision.kept.as_str()),
            count: Some(collision.shadowed.len() + 1),
        });
    }
    for symbol in &report.unreferenced_symbols {
        records.push(Record {
            kind: RecordKind::Symbol,
            name: &symbol.name,
            location: Some(symbol.file.as_str()),
            count: None,
        });
    }

    let mut out = String::new();
    for record in &records {
        out.push_str(&serde_json::to_string(record).into_diagnostic()?);
        out.push('\n');
    }
    Ok(out)
}

fn emit(output_path: Option<&PathBuf>, text: &str) -> Result<()> {
    if let Some(path) = output_path {
        let contents = if text.is_empty() {
            String::new()
        } else {
            format!("{}\n", text)
        };
        std::fs::write(path, contents).into_diagnostic()?;
        eprintln!("Report written to: {}", path.display());
    } else if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}
