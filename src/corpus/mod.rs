//! Corpus building
//!
//! One walk over the project produces every artifact the resolvers need:
//! the asset registry, the symbol registry and the searchable text corpus.
//! The result is a frozen [`Corpus`] that resolution only reads.

mod assets;
mod symbols;
mod text;

pub use assets::{logical_name, AssetEntry, AssetRegistry};
pub use symbols::{SymbolCollision, SymbolRegistry};
pub use text::{CorpusFile, SearchCorpus};

use crate::config::Config;
use crate::discovery::{read_all, DiscoveredFile, FileFinder, FileKind, FileStats};
use crate::patterns::DeclarationMatcher;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Fatal scan errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Project path does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("Project path is not a directory: {0}")]
    RootNotDirectory(PathBuf),
    #[error("Invalid declaration pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Which detection passes to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passes {
    pub assets: bool,
    pub symbols: bool,
}

impl Passes {
    pub fn all() -> Self {
        Self {
            assets: true,
            symbols: true,
        }
    }

    pub fn assets_only() -> Self {
        Self {
            assets: true,
            symbols: false,
        }
    }

    pub fn symbols_only() -> Self {
        Self {
            assets: false,
            symbols: true,
        }
    }
}

impl Default for Passes {
    fn default() -> Self {
        Self::all()
    }
}

/// Frozen per-run state: registries and corpus
#[derive(Debug, Clone)]
pub struct Corpus {
    pub root: PathBuf,
    pub passes: Passes,
    pub assets: AssetRegistry,
    pub symbols: SymbolRegistry,
    pub search: SearchCorpus,
    pub stats: FileStats,
}

/// Builds a [`Corpus`] from a project tree
pub struct CorpusBuilder<'a> {
    config: &'a Config,
    passes: Passes,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            passes: Passes::all(),
        }
    }

    pub fn with_passes(mut self, passes: Passes) -> Self {
        self.passes = passes;
        self
    }

    pub fn build(&self, root: &Path) -> Result<Corpus, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::RootNotDirectory(root.to_path_buf()));
        }

        let matcher = DeclarationMatcher::new(&self.config.symbols.declaration_keywords)?;

        let finder = FileFinder::new(self.config);
        let files = finder.find_files(root);
        let stats = FileStats::from_files(&files);
        info!(
            "Found {} images, {} source files, {} markup files",
            stats.image_files, stats.source_files, stats.markup_files
        );

        let assets = if self.passes.assets {
            self.collect_assets(&files)
        } else {
            AssetRegistry::new()
        };

        let search = self.collect_text(&files);

        let symbols = if self.passes.symbols {
            collect_symbols(&search, &matcher)
        } else {
            SymbolRegistry::new()
        };

        debug!(
            "Corpus: {} asset names, {} symbols, {} searchable files ({} bytes)",
            assets.len(),
            symbols.len(),
            search.len(),
            search.text().len()
        );

        Ok(Corpus {
            root: root.to_path_buf(),
            passes: self.passes,
            assets,
            symbols,
            search,
            stats,
        })
    }

    fn collect_assets(&self, files: &[DiscoveredFile]) -> AssetRegistry {
        let suffix = &self.config.files.asset_bundle_suffix;
        let mut registry = AssetRegistry::new();

        for file in files.iter().filter(|f| f.kind == FileKind::Image) {
            if let Some((name, bundle)) = logical_name(&file.path, suffix) {
                registry.insert(name, file.path.clone(), bundle);
            }
        }

        registry
    }

    fn collect_text(&self, files: &[DiscoveredFile]) -> SearchCorpus {
        let searchable: Vec<DiscoveredFile> = files
            .iter()
            .filter(|f| f.kind.is_searchable())
            .cloned()
            .collect();

        // Reads run on the rayon pool; insertion stays on this thread in walk order
        let contents = read_all(&searchable);

        let mut search = SearchCorpus::new();
        for (file, content) in searchable.into_iter().zip(contents) {
            search.push(file.path, file.kind, &content);
        }
        search
    }
}

fn collect_symbols(search: &SearchCorpus, matcher: &DeclarationMatcher) -> SymbolRegistry {
    let mut registry = SymbolRegistry::new();
    for file in search.sources() {
        for name in matcher.declared_names(search.contents(file)) {
            registry.insert(name, &file.path);
        }
    }
    registry
}
