mod loader;

pub use loader::{Config, FileConfig, ReportConfig, SymbolConfig};
