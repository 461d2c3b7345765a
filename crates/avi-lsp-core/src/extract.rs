//! Lightweight extraction of user-defined symbols from document text
//!
//! There is no parser behind this: declarations are found with two regular
//! expressions over the raw text. Declarations inside comments or strings
//! are picked up too, and incomplete ones are skipped silently.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// `fn name(params)`
static FN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfn\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)").unwrap()
});

/// `let name`, `let mut name`, `const name`
static VAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:let|const)\s+(?:mut\s+)?([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

/// A function declared in the current document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceFunction {
    pub name: String,
    /// Reconstructed call signature, e.g. `add(a: int, b: int)`
    pub signature: String,
}

/// Source of user-declared symbols for a document
pub trait SymbolExtractor: Send + Sync {
    /// Function declarations in document order
    fn extract_functions(&self, text: &str) -> Vec<WorkspaceFunction>;

    /// Declared variable names, each reported once
    fn extract_variables(&self, text: &str) -> Vec<String>;
}

/// Regex-based [`SymbolExtractor`]
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexExtractor;

impl SymbolExtractor for RegexExtractor {
    fn extract_functions(&self, text: &str) -> Vec<WorkspaceFunction> {
        function_headers(text).map(|(_, function)| function).collect()
    }

    fn extract_variables(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        VAR_REGEX
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

/// Every `fn` declaration, paired with the byte offset just past its parameter list
pub(crate) fn function_headers(
    text: &str,
) -> impl Iterator<Item = (usize, WorkspaceFunction)> + '_ {
    FN_REGEX.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?.as_str();
        let args = caps.get(2).map_or("", |m| m.as_str());
        Some((
            whole.end(),
            WorkspaceFunction {
                name: name.to_string(),
                signature: format!("{}({})", name, args),
            },
        ))
    })
}
