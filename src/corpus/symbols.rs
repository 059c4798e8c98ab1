//! Symbol declaration registry

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A name declared in more than one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCollision {
    pub name: String,
    /// The declaration the registry kept (last seen)
    pub kept: PathBuf,
    /// Earlier declarations that were overwritten
    pub shadowed: Vec<PathBuf>,
}

/// Maps each symbol name to exactly one declaring file.
///
/// Duplicate names are last-write-wins; overwritten paths are remembered so
/// they can be reported, but never take part in resolution.
#[derive(Debug, Default, Clone)]
pub struct SymbolRegistry {
    declarations: BTreeMap<String, PathBuf>,
    shadowed: BTreeMap<String, Vec<PathBuf>>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, path: &Path) {
        if let Some(previous) = self.declarations.insert(name.to_string(), path.to_path_buf()) {
            if previous != path {
                let shadowed = self.shadowed.entry(name.to_string()).or_default();
                if !shadowed.contains(&previous) {
                    shadowed.push(previous);
                }
            }
        }
    }

    /// Declaring file for a name
    pub fn declaring_path(&self, name: &str) -> Option<&Path> {
        self.declarations.get(name).map(PathBuf::as_path)
    }

    /// Declarations sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.declarations
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Names declared in more than one file, sorted by name
    pub fn collisions(&self) -> Vec<SymbolCollision> {
        self.shadowed
            .iter()
            .filter_map(|(name, shadowed)| {
                // A later redeclaration in an earlier file brings the kept path back
                let kept = self.declarations.get(name)?;
                let shadowed: Vec<PathBuf> =
                    shadowed.iter().filter(|p| *p != kept).cloned().collect();
                if shadowed.is_empty() {
                    return None;
                }
                Some(SymbolCollision {
                    name: name.clone(),
                    kept: kept.clone(),
                    shadowed,
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
