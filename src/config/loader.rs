use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a SearchUnused run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path substrings to exclude from scanning (case-insensitive)
    pub exclude: Vec<String>,

    /// Names that are never reported (e.g. "*Cell", "Legacy*", "AppDelegate")
    pub retain_patterns: Vec<String>,

    /// File classification configuration
    pub files: FileConfig,

    /// Symbol detection configuration
    pub symbols: SymbolConfig,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Extensions treated as image assets
    pub image_extensions: Vec<String>,

    /// Extensions treated as source code (searched and scanned for declarations)
    pub source_extensions: Vec<String>,

    /// Extensions treated as interface-definition markup (searched only)
    pub markup_extensions: Vec<String>,

    /// Directory suffix that names an asset bundle
    pub asset_bundle_suffix: String,

    /// Skip dot-prefixed files and directories
    pub skip_hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    /// Keywords that introduce a type declaration
    pub declaration_keywords: Vec<String>,

    /// Framework prefixes that are assumed always used
    pub framework_prefixes: Vec<String>,

    /// Built-in type names that are assumed always used
    pub builtin_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json, ndjson
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: to_strings(&["Pods", "Carthage", ".git", "build"]),
            retain_patterns: vec![],
            files: FileConfig::default(),
            symbols: SymbolConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            image_extensions: to_strings(&[
                "png", "jpg", "jpeg", "heic", "gif", "webp", "tiff", "bmp", "svg",
            ]),
            source_extensions: to_strings(&["swift"]),
            markup_extensions: to_strings(&["xib", "storyboard"]),
            asset_bundle_suffix: ".imageset".to_string(),
            skip_hidden: true,
        }
    }
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            declaration_keywords: to_strings(&["class", "struct", "enum"]),
            framework_prefixes: to_strings(&["NS", "UI", "CG", "CA", "KF"]),
            builtin_types: to_strings(&[
                "String",
                "Int",
                "Double",
                "Bool",
                "Array",
                "Dictionary",
                "Set",
                "Optional",
                "Result",
                "Date",
                "URL",
                "Error",
                "Codable",
                "Decodable",
                "Encodable",
            ]),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations in the project root
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".searchunused.yml",
            ".searchunused.yaml",
            ".searchunused.toml",
            "searchunused.yml",
            "searchunused.yaml",
            "searchunused.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check if a name should never be reported
    pub fn should_retain(&self, name: &str) -> bool {
        self.retain_patterns.iter().any(|p| name_matches(p, name))
    }
}

/// Name matching for retain patterns: "*Cell", "Legacy*" or an exact name
fn name_matches(pattern: &str, name: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix('*') {
        return name.ends_with(suffix);
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return name.starts_with(prefix);
    }
    name == pattern
}
