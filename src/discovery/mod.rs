mod file_finder;

pub use file_finder::{
    read_all, DiscoveredFile, FileClassifier, FileFinder, FileKind, FileStats, PathFilter,
};
