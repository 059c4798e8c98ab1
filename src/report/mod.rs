mod json;
mod terminal;

pub use json::{JsonReporter, NdjsonReporter};
pub use terminal::TerminalReporter;

use crate::config::Config;
use crate::corpus::{Corpus, Passes};
use crate::resolve::{AssetResolution, SymbolResolution};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Fixed note printed after the unreferenced symbol list
pub const TRANSITIVE_NOTE: &str = "If A references B but nothing outside A references A, only A is \
reported. Check A by hand: if A really is unused, B should be treated as unused as well.";

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
    Ndjson,
}

impl ReportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "terminal" => Some(ReportFormat::Terminal),
            "json" => Some(ReportFormat::Json),
            "ndjson" | "jsonl" => Some(ReportFormat::Ndjson),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetCollision {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreferencedAsset {
    pub name: String,
    /// Bundle directory or first file, relative to the project root
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolCollisionEntry {
    pub name: String,
    pub kept: String,
    pub shadowed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreferencedSymbol {
    pub name: String,
    /// Declaring file, relative to the project root
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub image_files: usize,
    pub source_files: usize,
    pub markup_files: usize,
    pub asset_names: usize,
    pub symbols_declared: usize,
    pub symbols_checked: usize,
}

/// Aggregated, presentation-ready results of one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub root: String,
    #[serde(skip)]
    pub passes: Passes,
    pub asset_collisions: Vec<AssetCollision>,
    pub unreferenced_assets: Vec<UnreferencedAsset>,
    pub symbol_collisions: Vec<SymbolCollisionEntry>,
    pub unreferenced_symbols: Vec<UnreferencedSymbol>,
    pub summary: ReportSummary,
}

impl Report {
    /// Aggregate resolver output. Names matching the retain patterns are
    /// dropped; every list is sorted by name.
    pub fn build(
        corpus: &Corpus,
        assets: &[AssetResolution<'_>],
        symbols: &[SymbolResolution<'_>],
        config: &Config,
    ) -> Self {
        let root = corpus.root.as_path();

        let asset_collisions = corpus
            .assets
            .collisions()
            .into_iter()
            .map(|(name, count)| AssetCollision {
                name: name.to_string(),
                count,
            })
            .collect();

        let mut unreferenced_assets: Vec<UnreferencedAsset> = assets
            .iter()
            .filter(|r| !r.verdict.referenced)
            .filter(|r| !config.should_retain(&r.entry.name))
            .map(|r| UnreferencedAsset {
                name: r.entry.name.clone(),
                location: r.entry.best_location().map(|p| display_path(root, p)),
            })
            .collect();
        unreferenced_assets.sort_by(|a, b| a.name.cmp(&b.name));

        let symbol_collisions = corpus
            .symbols
            .collisions()
            .into_iter()
            .map(|c| SymbolCollisionEntry {
                name: c.name,
                kept: display_path(root, &c.kept),
                shadowed: c.shadowed.iter().map(|p| display_path(root, p)).collect(),
            })
            .collect();

        let mut unreferenced_symbols: Vec<UnreferencedSymbol> = symbols
            .iter()
            .filter(|r| !r.verdict.referenced)
            .filter(|r| !config.should_retain(r.name))
            .map(|r| UnreferencedSymbol {
                name: r.name.to_string(),
                file: display_path(root, r.declaring_path),
            })
            .collect();
        unreferenced_symbols.sort_by(|a, b| a.name.cmp(&b.name));

        let summary = ReportSummary {
            image_files: corpus.stats.image_files,
            source_files: corpus.stats.source_files,
            markup_files: corpus.stats.markup_files,
            asset_names: corpus.assets.len(),
            symbols_declared: corpus.symbols.len(),
            symbols_checked: symbols.len(),
        };

        Self {
            root: root.display().to_string(),
            passes: corpus.passes,
            asset_collisions,
            unreferenced_assets,
            symbol_collisions,
            unreferenced_symbols,
            summary,
        }
    }
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Reporter for outputting analysis results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => TerminalReporter::new(self.output_path.clone()).report(report),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(report),
            ReportFormat::Ndjson => NdjsonReporter::new(self.output_path.clone()).report(report),
        }
    }
}

/// Write unreferenced symbol names, one per line, for an external rewrite tool
pub fn write_deletion_list(report: &Report, path: &Path) -> Result<()> {
    let mut contents = String::new();
    for symbol in &report.unreferenced_symbols {
        contents.push_str(&symbol.name);
        contents.push('\n');
    }

    std::fs::write(path, contents)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write deletion list: {}", path.display()))
}
