use crate::config::{Config, FileConfig};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Category of a path, decided by its extension alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Image asset (png, jpg, svg, ...)
    Image,
    /// Source code, searched and scanned for declarations
    Source,
    /// Interface-definition markup (xib, storyboard), searched only
    Markup,
    Ignored,
}

impl FileKind {
    /// Check if files of this kind belong to the search corpus
    pub fn is_searchable(&self) -> bool {
        matches!(self, FileKind::Source | FileKind::Markup)
    }
}

/// Extension-based file classifier
#[derive(Debug, Clone)]
pub struct FileClassifier {
    images: HashSet<String>,
    sources: HashSet<String>,
    markup: HashSet<String>,
}

impl FileClassifier {
    pub fn new(config: &FileConfig) -> Self {
        Self {
            images: extension_set(&config.image_extensions),
            sources: extension_set(&config.source_extensions),
            markup: extension_set(&config.markup_extensions),
        }
    }

    /// Classify a path by its lower-cased extension
    pub fn classify(&self, path: &Path) -> FileKind {
        let Some(extension) = path.extension() else {
            return FileKind::Ignored;
        };
        let extension = extension.to_string_lossy().to_lowercase();

        if self.images.contains(&extension) {
            FileKind::Image
        } else if self.sources.contains(&extension) {
            FileKind::Source
        } else if self.markup.contains(&extension) {
            FileKind::Markup
        } else {
            FileKind::Ignored
        }
    }
}

fn extension_set(extensions: &[String]) -> HashSet<String> {
    extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_lowercase())
        .collect()
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(&FileConfig::default())
    }
}

/// Case-insensitive substring exclusion list
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    needles: Vec<String>,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let needles = patterns
            .iter()
            .map(|p| p.as_ref().to_lowercase())
            // An empty needle would match every path
            .filter(|p| !p.is_empty())
            .collect();
        Self { needles }
    }

    /// True iff the lower-cased path contains any exclusion entry
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy().to_lowercase();
        self.needles.iter().any(|needle| path.contains(needle.as_str()))
    }
}

/// A file accepted by the path filter and classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path to the file (root-joined)
    pub path: PathBuf,

    /// Category of the file
    pub kind: FileKind,
}

impl DiscoveredFile {
    pub fn new(path: PathBuf, kind: FileKind) -> Self {
        Self { path, kind }
    }

    /// Read the file as UTF-8 text
    pub fn read_contents(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }

    /// Read the file, degrading to empty content when it cannot be read
    pub fn read_contents_lossy(&self) -> String {
        match self.read_contents() {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Cannot read {}: {}", self.path.display(), e);
                String::new()
            }
        }
    }
}

/// File finder for discovering assets, sources and markup in a project
pub struct FileFinder {
    filter: PathFilter,
    classifier: FileClassifier,
    skip_hidden: bool,
}

impl FileFinder {
    pub fn new(config: &Config) -> Self {
        Self {
            filter: PathFilter::new(&config.exclude),
            classifier: FileClassifier::new(&config.files),
            skip_hidden: config.files.skip_hidden,
        }
    }

    /// Find every accepted file under root, sorted by path
    pub fn find_files(&self, root: &Path) -> Vec<DiscoveredFile> {
        debug!("Scanning for files in: {}", root.display());

        let files: Vec<DiscoveredFile> = self.walk(root).collect();

        debug!("Found {} files", files.len());
        files
    }

    /// Lazily walk root, yielding files accepted by the filter and classifier.
    ///
    /// Excluded directories are pruned so their subtrees are never visited.
    /// The match is made against the root-anchored path, e.g. `/App/A.swift`,
    /// so the location of the project itself never excludes it.
    pub fn walk<'a>(&'a self, root: &Path) -> impl Iterator<Item = DiscoveredFile> + 'a {
        let prune_filter = self.filter.clone();
        let prune_root = root.to_path_buf();

        let walker = WalkBuilder::new(root)
            .hidden(self.skip_hidden)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                !prune_filter.is_excluded(&anchored(&prune_root, entry.path()))
            })
            .build();

        let root = root.to_path_buf();
        walker
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Walk error: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(move |entry| {
                let path = entry.path();

                if self.filter.is_excluded(&anchored(&root, path)) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                match self.classifier.classify(path) {
                    FileKind::Ignored => None,
                    kind => {
                        trace!("Found {:?}: {}", kind, path.display());
                        Some(DiscoveredFile::new(path.to_path_buf(), kind))
                    }
                }
            })
    }
}

/// Path relative to root with a leading separator, so `/vendor/` matches a
/// top-level `Vendor` directory.
fn anchored(root: &Path, path: &Path) -> PathBuf {
    Path::new("/").join(path.strip_prefix(root).unwrap_or(path))
}

/// Read the contents of many files on the rayon pool, preserving input order
pub fn read_all(files: &[DiscoveredFile]) -> Vec<String> {
    files.par_iter().map(|f| f.read_contents_lossy()).collect()
}

/// Statistics about discovered files
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub image_files: usize,
    pub source_files: usize,
    pub markup_files: usize,
}

impl FileStats {
    pub fn from_files(files: &[DiscoveredFile]) -> Self {
        let mut stats = Self::default();
        for file in files {
            match file.kind {
                FileKind::Image => stats.image_files += 1,
                FileKind::Source => stats.source_files += 1,
                FileKind::Markup => stats.markup_files += 1,
                FileKind::Ignored => {}
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.image_files + self.source_files + self.markup_files
    }
}
