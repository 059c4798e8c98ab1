//! Searchable text corpus
//!
//! All searchable files share one backing string: the concatenated corpus is
//! searched directly for asset references, and each file's slice of it is
//! searched for symbol references.

use crate::discovery::FileKind;
use std::ops::Range;
use std::path::PathBuf;

/// A searchable file and its span in the corpus text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    pub path: PathBuf,
    pub kind: FileKind,
    span: Range<usize>,
}

/// Write-once text corpus of every source and markup file
#[derive(Debug, Default, Clone)]
pub struct SearchCorpus {
    text: String,
    files: Vec<CorpusFile>,
}

impl SearchCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file's contents.
    ///
    /// Files are separated by a newline so a pattern can never straddle two
    /// files; no search pattern contains a newline.
    pub fn push(&mut self, path: PathBuf, kind: FileKind, contents: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        let start = self.text.len();
        self.text.push_str(contents);
        self.files.push(CorpusFile {
            path,
            kind,
            span: start..self.text.len(),
        });
    }

    /// The concatenated text of every file
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the pattern occurs anywhere in the concatenated text
    pub fn contains(&self, pattern: &str) -> bool {
        self.text.contains(pattern)
    }

    /// The content of one file
    pub fn contents(&self, file: &CorpusFile) -> &str {
        &self.text[file.span.clone()]
    }

    pub fn files_of_kind(&self, kind: FileKind) -> impl Iterator<Item = &CorpusFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    pub fn sources(&self) -> impl Iterator<Item = &CorpusFile> {
        self.files_of_kind(FileKind::Source)
    }

    pub fn markup(&self) -> impl Iterator<Item = &CorpusFile> {
        self.files_of_kind(FileKind::Markup)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
