//! Asset name registry
//!
//! Logical asset names in first-seen order, with the files that produced each
//! name and a same-name collision counter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One logical asset name and everything that resolved to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    /// Logical name (extension or bundle suffix stripped, case-sensitive)
    pub name: String,

    /// Every image file that produced this name
    pub locations: Vec<PathBuf>,

    /// Asset bundle directory the name was derived from, if any
    pub bundle: Option<PathBuf>,
}

impl AssetEntry {
    /// Best known location: the bundle directory, else the first file
    pub fn best_location(&self) -> Option<&Path> {
        self.bundle
            .as_deref()
            .or_else(|| self.locations.first().map(PathBuf::as_path))
    }
}

/// Derive the logical asset name for an image path.
///
/// If a path component ends with the bundle suffix (case-insensitive), the
/// name is that component without the suffix and the bundle path is
/// returned too; the innermost such component wins. Otherwise the name is
/// the file stem.
pub fn logical_name(path: &Path, bundle_suffix: &str) -> Option<(String, Option<PathBuf>)> {
    let suffix = bundle_suffix.to_lowercase();
    let mut found = None;

    if !suffix.is_empty() {
        let mut prefix = PathBuf::new();
        for component in path.components() {
            prefix.push(component);
            let component = component.as_os_str().to_string_lossy();
            if component.len() > suffix.len() && component.to_lowercase().ends_with(&suffix) {
                if let Some(name) = component.get(..component.len() - suffix.len()) {
                    found = Some((name.to_string(), Some(prefix.clone())));
                }
            }
        }
    }

    if found.is_some() {
        return found;
    }

    let stem = path.file_stem()?.to_string_lossy().to_string();
    if stem.is_empty() {
        return None;
    }
    Some((stem, None))
}

/// Registry of logical asset names in insertion order
#[derive(Debug, Default, Clone)]
pub struct AssetRegistry {
    entries: Vec<AssetEntry>,
    index: HashMap<String, usize>,
    collisions: HashMap<String, usize>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image file under a logical name.
    ///
    /// The first occurrence creates the entry. Each later occurrence bumps
    /// the collision count, which starts at 2 for the first duplicate.
    pub fn insert(&mut self, name: String, path: PathBuf, bundle: Option<PathBuf>) {
        match self.index.get(&name) {
            Some(&idx) => {
                let entry = &mut self.entries[idx];
                if !entry.locations.contains(&path) {
                    entry.locations.push(path);
                }
                if entry.bundle.is_none() {
                    entry.bundle = bundle;
                }
                *self.collisions.entry(name).or_insert(1) += 1;
            }
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(AssetEntry {
                    name,
                    locations: vec![path],
                    bundle,
                });
            }
        }
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&AssetEntry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    /// Number of files sharing the name, if more than one
    pub fn collision_count(&self, name: &str) -> Option<usize> {
        self.collisions.get(name).copied()
    }

    /// Names used by multiple files with their counts, sorted by name
    pub fn collisions(&self) -> Vec<(&str, usize)> {
        let mut collisions: Vec<_> = self
            .collisions
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        collisions.sort();
        collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
