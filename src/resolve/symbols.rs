use super::{validate_name, ReferenceVerdict, ResolveError};
use crate::corpus::{SearchCorpus, SymbolRegistry};
use crate::patterns::{SymbolExclusions, SYMBOL_MARKUP_PATTERNS, SYMBOL_SOURCE_PATTERNS};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Verdict for one declared symbol
#[derive(Debug, Clone)]
pub struct SymbolResolution<'a> {
    pub name: &'a str,
    pub declaring_path: &'a Path,
    pub verdict: ReferenceVerdict,
}

/// Resolves symbol names against other files of the corpus
pub struct SymbolResolver<'a> {
    corpus: &'a SearchCorpus,
    exclusions: &'a SymbolExclusions,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(corpus: &'a SearchCorpus, exclusions: &'a SymbolExclusions) -> Self {
        Self { corpus, exclusions }
    }

    /// Resolve one symbol declared in `declaring_path`.
    ///
    /// Only references outside the declaring file count: `Name(` or
    /// `Name.self` in another source file, or `customClass="Name"` in any
    /// markup file.
    pub fn resolve(&self, name: &str, declaring_path: &Path) -> Result<ReferenceVerdict, ResolveError> {
        validate_name(name)?;

        for kind in SYMBOL_SOURCE_PATTERNS {
            let pattern = kind.render(name);
            let found = self
                .corpus
                .sources()
                .filter(|file| file.path != declaring_path)
                .any(|file| self.corpus.contents(file).contains(&pattern));
            if found {
                return Ok(ReferenceVerdict::referenced(*kind));
            }
        }

        for kind in SYMBOL_MARKUP_PATTERNS {
            let pattern = kind.render(name);
            if self
                .corpus
                .markup()
                .any(|file| self.corpus.contents(file).contains(&pattern))
            {
                return Ok(ReferenceVerdict::referenced(*kind));
            }
        }

        Ok(ReferenceVerdict::unreferenced())
    }

    /// Resolve every registered symbol that is not a framework or built-in
    /// name, sorted by name. Progress advances once per symbol.
    pub fn resolve_all<'r>(
        &self,
        registry: &'r SymbolRegistry,
        progress: &ProgressBar,
    ) -> Vec<SymbolResolution<'r>> {
        let candidates: Vec<(&'r str, &'r Path)> = registry
            .iter()
            .filter(|(name, _)| {
                let excluded = self.exclusions.is_excluded(name);
                if excluded {
                    trace!("Assuming framework type is used: {}", name);
                }
                !excluded
            })
            .collect();

        progress.set_length(candidates.len() as u64);

        let results: Vec<SymbolResolution<'r>> = candidates
            .par_iter()
            .filter_map(|&(name, declaring_path)| {
                let result = self.resolve(name, declaring_path);
                progress.inc(1);
                match result {
                    Ok(verdict) => Some(SymbolResolution {
                        name,
                        declaring_path,
                        verdict,
                    }),
                    Err(e) => {
                        warn!("Skipping symbol {:?}: {}", name, e);
                        None
                    }
                }
            })
            .collect();

        debug!(
            "Resolved {} symbols ({} excluded), {} unreferenced",
            results.len(),
            registry.len() - candidates.len(),
            results.iter().filter(|r| !r.verdict.referenced).count()
        );
        results
    }
}
