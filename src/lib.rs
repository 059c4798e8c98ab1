//! SearchUnused - find unreferenced image assets and types in Swift projects
//!
//! Detection is purely textual: no compiler and no syntax tree, just literal
//! patterns searched over the project's source and Interface Builder files.
//! Results are candidates for human review, not proof of dead code.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **Discovery** - Walk the tree, filter excluded paths, classify files
//! 2. **Corpus** - Build the asset registry, symbol registry and search text
//! 3. **Resolution** - Test every name against literal reference patterns
//! 4. **Reporting** - Output results as text, JSON or NDJSON

pub mod config;
pub mod corpus;
pub mod discovery;
pub mod patterns;
pub mod report;
pub mod resolve;

pub use config::Config;
pub use corpus::{Corpus, CorpusBuilder, Passes, ScanError};
pub use discovery::{FileClassifier, FileFinder, FileKind, PathFilter};
pub use patterns::{DeclarationMatcher, PatternKind, SymbolExclusions};
pub use report::{Report, ReportFormat, Reporter};
pub use resolve::{AssetResolver, ReferenceVerdict, ResolveError, SymbolResolver};
