//! Pattern table for declaration and reference matching
//!
//! Every literal search pattern and the declaration regex live here, so the
//! resolvers only decide *where* to search, never *what* to search for.

use crate::config::SymbolConfig;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// Kind of textual reference that matched a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// `"Name"` - string literal in source
    QuotedLiteral,
    /// `name="Name"` - attribute in interface markup
    NameAttribute,
    /// `Name(` - constructor call or type annotation
    CallOrAnnotation,
    /// `Name.self` - metatype reference
    Metatype,
    /// `customClass="Name"` - class binding in interface markup
    CustomClass,
}

impl PatternKind {
    /// Render the literal search text for a name
    pub fn render(&self, name: &str) -> String {
        match self {
            PatternKind::QuotedLiteral => format!("\"{}\"", name),
            PatternKind::NameAttribute => format!("name=\"{}\"", name),
            PatternKind::CallOrAnnotation => format!("{}(", name),
            PatternKind::Metatype => format!("{}.self", name),
            PatternKind::CustomClass => format!("customClass=\"{}\"", name),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::QuotedLiteral => "quoted_literal",
            PatternKind::NameAttribute => "name_attribute",
            PatternKind::CallOrAnnotation => "call_or_annotation",
            PatternKind::Metatype => "metatype",
            PatternKind::CustomClass => "custom_class",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Patterns searched in the concatenated corpus for an asset name
pub const ASSET_PATTERNS: &[PatternKind] = &[PatternKind::QuotedLiteral, PatternKind::NameAttribute];

/// Patterns searched in source files other than the declaring one
pub const SYMBOL_SOURCE_PATTERNS: &[PatternKind] =
    &[PatternKind::CallOrAnnotation, PatternKind::Metatype];

/// Patterns searched in markup files
pub const SYMBOL_MARKUP_PATTERNS: &[PatternKind] = &[PatternKind::CustomClass];

/// Matches type declarations such as `class Foo`, `struct Bar: Codable`
#[derive(Debug, Clone)]
pub struct DeclarationMatcher {
    regex: Option<Regex>,
}

impl DeclarationMatcher {
    /// Build a matcher for the given declaration keywords.
    ///
    /// With no keywords the matcher never matches.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }

        let pattern = format!(r"(?:{})\s+([A-Z_][a-zA-Z0-9_]*)", alternatives.join("|"));
        Ok(Self {
            regex: Some(Regex::new(&pattern)?),
        })
    }

    /// Declared names in order of appearance
    pub fn declared_names<'a>(&'a self, content: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex
            .iter()
            .flat_map(move |regex| regex.captures_iter(content))
            .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
    }
}

impl Default for DeclarationMatcher {
    fn default() -> Self {
        Self::new(&SymbolConfig::default().declaration_keywords)
            .expect("default declaration keywords form a valid regex")
    }
}

/// Framework-prefix and built-in type filter for symbol names
#[derive(Debug, Clone, Default)]
pub struct SymbolExclusions {
    prefixes: Vec<String>,
    builtins: HashSet<String>,
}

impl SymbolExclusions {
    pub fn new(config: &SymbolConfig) -> Self {
        Self {
            prefixes: config
                .framework_prefixes
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
            builtins: config.builtin_types.iter().cloned().collect(),
        }
    }

    /// True for names assumed to come from a framework or the standard library
    pub fn is_excluded(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| name.starts_with(p.as_str())) || self.builtins.contains(name)
    }
}
