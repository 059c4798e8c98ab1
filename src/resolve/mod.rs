//! Reference resolution
//!
//! Resolvers are pure queries against a frozen [`crate::corpus::Corpus`]:
//! each name is tested independently against literal patterns from
//! [`crate::patterns`], so names are resolved in parallel.

mod assets;
mod symbols;

pub use assets::{AssetResolution, AssetResolver};
pub use symbols::{SymbolResolution, SymbolResolver};

use crate::patterns::PatternKind;
use serde::Serialize;
use thiserror::Error;

/// Errors that skip a single name without aborting the batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("empty name cannot be searched")]
    EmptyName,
    #[error("name {0:?} cannot form a literal search pattern")]
    DegenerateName(String),
}

/// Outcome of resolving one name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceVerdict {
    pub referenced: bool,
    /// The pattern that matched, `None` when unreferenced
    pub matched: Option<PatternKind>,
}

impl ReferenceVerdict {
    pub fn referenced(kind: PatternKind) -> Self {
        Self {
            referenced: true,
            matched: Some(kind),
        }
    }

    pub fn unreferenced() -> Self {
        Self {
            referenced: false,
            matched: None,
        }
    }

    pub fn is_referenced(&self) -> bool {
        self.referenced
    }
}

/// Reject names that cannot produce a meaningful literal pattern.
///
/// Quotes would close the pattern early and line breaks never occur inside a
/// single-line reference.
pub fn validate_name(name: &str) -> Result<(), ResolveError> {
    if name.trim().is_empty() {
        return Err(ResolveError::EmptyName);
    }
    if name.contains(['"', '\n', '\r']) {
        return Err(ResolveError::DegenerateName(name.to_string()));
    }
    Ok(())
}
