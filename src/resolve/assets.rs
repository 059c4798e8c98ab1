use super::{validate_name, ReferenceVerdict, ResolveError};
use crate::corpus::{AssetEntry, AssetRegistry, SearchCorpus};
use crate::patterns::ASSET_PATTERNS;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Verdict for one registered asset
#[derive(Debug, Clone)]
pub struct AssetResolution<'a> {
    pub entry: &'a AssetEntry,
    pub verdict: ReferenceVerdict,
}

/// Resolves asset names against the concatenated corpus
pub struct AssetResolver<'a> {
    corpus: &'a SearchCorpus,
}

impl<'a> AssetResolver<'a> {
    pub fn new(corpus: &'a SearchCorpus) -> Self {
        Self { corpus }
    }

    /// Referenced iff `"name"` or `name="name"` occurs anywhere in the corpus
    pub fn resolve(&self, name: &str) -> Result<ReferenceVerdict, ResolveError> {
        validate_name(name)?;

        let verdict = ASSET_PATTERNS
            .iter()
            .find(|kind| self.corpus.contains(&kind.render(name)))
            .map(|kind| ReferenceVerdict::referenced(*kind))
            .unwrap_or_else(ReferenceVerdict::unreferenced);

        Ok(verdict)
    }

    /// Resolve every registered asset, in registry order.
    ///
    /// Names that cannot be resolved are skipped with a warning.
    pub fn resolve_all<'r>(&self, registry: &'r AssetRegistry) -> Vec<AssetResolution<'r>> {
        let results: Vec<AssetResolution<'r>> = registry
            .entries()
            .par_iter()
            .filter_map(|entry| match self.resolve(&entry.name) {
                Ok(verdict) => Some(AssetResolution { entry, verdict }),
                Err(e) => {
                    warn!("Skipping asset {:?}: {}", entry.name, e);
                    None
                }
            })
            .collect();

        debug!(
            "Resolved {} assets, {} unreferenced",
            results.len(),
            results.iter().filter(|r| !r.verdict.referenced).count()
        );
        results
    }
}
