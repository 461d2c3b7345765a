//! Builtin symbol table for the Avi language
//!
//! The table is built once at startup, either from the compiled-in
//! [`DEFAULT_BUILTINS`] or from a JSON file, and is read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::label::{decode_label, DecodedLabel};

/// Category of a completion symbol
///
/// Variants map onto the protocol's completion item kinds through
/// [`SymbolKind::code`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Method,
    Function,
    Variable,
    Type,
    Module,
    Keyword,
    Snippet,
    Constant,
}

impl SymbolKind {
    /// Numeric completion item kind used on the wire
    pub fn code(&self) -> u32 {
        match self {
            SymbolKind::Method => 2,
            SymbolKind::Function => 3,
            SymbolKind::Variable => 6,
            SymbolKind::Type => 7,
            SymbolKind::Module => 9,
            SymbolKind::Keyword => 14,
            SymbolKind::Snippet => 15,
            SymbolKind::Constant => 21,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Method => "method",
            SymbolKind::Function => "function",
            SymbolKind::Variable => "variable",
            SymbolKind::Type => "type",
            SymbolKind::Module => "module",
            SymbolKind::Keyword => "keyword",
            SymbolKind::Snippet => "snippet",
            SymbolKind::Constant => "constant",
        }
    }
}

/// Markup flavour of structured documentation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    PlainText,
    Markdown,
}

/// Extended documentation attached to a symbol
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Documentation {
    Text(String),
    Markup { kind: MarkupKind, value: String },
}

impl Documentation {
    pub fn markdown(value: impl Into<String>) -> Self {
        Documentation::Markup {
            kind: MarkupKind::Markdown,
            value: value.into(),
        }
    }
}

/// One language-provided identifier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinSymbol {
    /// Raw label, possibly using the `base__arg_arg` convention
    pub label: String,
    pub kind: SymbolKind,
    /// Call signature in `(name: Type, ...)` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
}

impl BuiltinSymbol {
    pub fn new(label: &str, kind: SymbolKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            detail: None,
            documentation: None,
        }
    }

    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_docs(mut self, documentation: &str) -> Self {
        self.documentation = Some(Documentation::markdown(documentation));
        self
    }

    pub fn decoded(&self) -> DecodedLabel {
        decode_label(&self.label)
    }

    /// Key carried in a suggestion's `data` field to find this symbol again
    pub fn correlation_key(&self) -> String {
        format!("{}_{}", self.label, self.kind.code())
    }
}

/// Errors raised while loading a builtin table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read builtin table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse builtin table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, immutable collection of builtin symbols
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltinTable {
    symbols: Vec<BuiltinSymbol>,
}

impl BuiltinTable {
    pub fn new(symbols: Vec<BuiltinSymbol>) -> Self {
        let table = Self { symbols };
        for key in table.duplicate_keys() {
            tracing::warn!("Duplicate builtin correlation key: {}", key);
        }
        for (label, kind) in table.duplicate_labels() {
            tracing::warn!("Builtin {} '{}' is declared more than once", kind.as_str(), label);
        }
        table
    }

    /// Parse a table from its JSON array form
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let symbols: Vec<BuiltinSymbol> = serde_json::from_str(json)?;
        Ok(Self::new(symbols))
    }

    /// Load a table from a JSON file
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn symbols(&self) -> &[BuiltinSymbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Find the symbol a suggestion's `data` key was built from
    pub fn find_by_key(&self, key: &str) -> Option<&BuiltinSymbol> {
        self.symbols.iter().find(|s| s.correlation_key() == key)
    }

    /// Correlation keys shared by more than one symbol
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for symbol in &self.symbols {
            let key = symbol.correlation_key();
            if !seen.insert(key.clone()) && !duplicates.contains(&key) {
                duplicates.push(key);
            }
        }
        duplicates
    }

    /// Visible labels shared by more than one symbol of the same kind
    ///
    /// `len__list` and `len__text` differ in their keys but both show up as
    /// `len`.
    pub fn duplicate_labels(&self) -> Vec<(String, SymbolKind)> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for symbol in &self.symbols {
            let entry = (symbol.decoded().base_label, symbol.kind);
            if !seen.insert(entry.clone()) && !duplicates.contains(&entry) {
                duplicates.push(entry);
            }
        }
        duplicates
    }
}

/// Compiled-in Avi builtins
pub static DEFAULT_BUILTINS: Lazy<BuiltinTable> =
    Lazy::new(|| BuiltinTable::new(build_default_symbols()));

/// Get the compiled-in builtin table
pub fn default_table() -> &'static BuiltinTable {
    &DEFAULT_BUILTINS
}

fn build_default_symbols() -> Vec<BuiltinSymbol> {
    let mut symbols = Vec::new();

    symbols.extend(build_function_symbols());
    symbols.extend(build_keyword_symbols());
    symbols.extend(build_constant_symbols());
    symbols.extend(build_type_symbols());

    symbols
}

fn build_function_symbols() -> Vec<BuiltinSymbol> {
    use SymbolKind::Function;

    vec![
        // === I/O ===
        BuiltinSymbol::new("print", Function)
            .with_detail("(value: str)")
            .with_docs("```avi\nprint(value: str)\n```\nWrites `value` to standard output followed by a newline."),
        BuiltinSymbol::new("input", Function)
            .with_detail("(prompt: str)")
            .with_docs("```avi\ninput(prompt: str) -> str\n```\nShows `prompt` and reads one line from standard input."),
        BuiltinSymbol::new("read_file", Function)
            .with_detail("(path: str)")
            .with_docs("```avi\nread_file(path: str) -> str\n```\nReturns the whole content of the file at `path`."),
        BuiltinSymbol::new("write_file", Function)
            .with_detail("(path: str, content: str)")
            .with_docs("```avi\nwrite_file(path: str, content: str)\n```\nReplaces the file at `path` with `content`."),
        // === LISTS ===
        BuiltinSymbol::new("len__list", Function)
            .with_detail("(list: list)")
            .with_docs("```avi\nlen(list: list) -> int\n```\nNumber of elements in `list`."),
        BuiltinSymbol::new("push__list_item", Function)
            .with_detail("(list: list, item: any)")
            .with_docs("```avi\npush(list: list, item: any)\n```\nAppends `item` to the end of `list`."),
        BuiltinSymbol::new("pop__list", Function)
            .with_detail("(list: list)")
            .with_docs("```avi\npop(list: list) -> any\n```\nRemoves and returns the last element of `list`."),
        BuiltinSymbol::new("insert__list_index_item", Function)
            .with_detail("(list: list, index: int, item: any)")
            .with_docs("```avi\ninsert(list: list, index: int, item: any)\n```\nInserts `item` at `index`, shifting later elements."),
        BuiltinSymbol::new("range", Function)
            .with_detail("(start: int, end: int)")
            .with_docs("```avi\nrange(start: int, end: int) -> list\n```\nIntegers from `start` up to but excluding `end`."),
        // === STRINGS ===
        BuiltinSymbol::new("split", Function)
            .with_detail("(text: str, sep: str)")
            .with_docs("```avi\nsplit(text: str, sep: str) -> list\n```\nSplits `text` on every occurrence of `sep`."),
        BuiltinSymbol::new("join", Function)
            .with_detail("(items: list, sep: str)")
            .with_docs("```avi\njoin(items: list, sep: str) -> str\n```\nConcatenates `items` with `sep` between them."),
        BuiltinSymbol::new("trim", Function)
            .with_detail("(text: str)")
            .with_docs("```avi\ntrim(text: str) -> str\n```\nRemoves leading and trailing whitespace."),
        // === CONVERSION ===
        BuiltinSymbol::new("to_int", Function)
            .with_detail("(value: any)")
            .with_docs("```avi\nto_int(value: any) -> int\n```\nConverts `value` to an integer."),
        BuiltinSymbol::new("to_str", Function)
            .with_detail("(value: any)")
            .with_docs("```avi\nto_str(value: any) -> str\n```\nConverts `value` to its string form."),
        BuiltinSymbol::new("type_of", Function)
            .with_detail("(value: any)")
            .with_docs("```avi\ntype_of(value: any) -> str\n```\nName of the runtime type of `value`."),
        // === MISC ===
        BuiltinSymbol::new("assert__cond", Function)
            .with_detail("(cond: bool, message: str)")
            .with_docs("```avi\nassert(cond: bool, message: str)\n```\nAborts with `message` when `cond` is false."),
        BuiltinSymbol::new("now", Function)
            .with_detail("()")
            .with_docs("```avi\nnow() -> int\n```\nCurrent time in milliseconds since the Unix epoch."),
        BuiltinSymbol::new("exit", Function)
            .with_detail("(code: int)")
            .with_docs("```avi\nexit(code: int)\n```\nTerminates the program with `code`."),
    ]
}

fn build_keyword_symbols() -> Vec<BuiltinSymbol> {
    ["fn", "let", "const", "mut", "if", "else", "while", "for", "in", "return", "break", "continue"]
        .into_iter()
        .map(|kw| BuiltinSymbol::new(kw, SymbolKind::Keyword))
        .collect()
}

fn build_constant_symbols() -> Vec<BuiltinSymbol> {
    vec![
        BuiltinSymbol::new("true", SymbolKind::Constant).with_docs("Boolean true."),
        BuiltinSymbol::new("false", SymbolKind::Constant).with_docs("Boolean false."),
        BuiltinSymbol::new("null", SymbolKind::Constant).with_docs("The absence of a value."),
    ]
}

fn build_type_symbols() -> Vec<BuiltinSymbol> {
    ["int", "float", "str", "bool", "list", "any"]
        .into_iter()
        .map(|ty| BuiltinSymbol::new(ty, SymbolKind::Type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_table_has_no_duplicate_keys() {
        assert!(default_table().duplicate_keys().is_empty());
        assert!(default_table().duplicate_labels().is_empty());
    }

    #[test]
    fn test_default_table_contents() {
        let labels: Vec<String> = default_table()
            .symbols()
            .iter()
            .map(|s| s.decoded().base_label)
            .collect();

        assert!(labels.contains(&"print".to_string()), "Missing print");
        assert!(labels.contains(&"push".to_string()), "Missing push");
        assert!(labels.contains(&"fn".to_string()), "Missing fn keyword");
        assert!(labels.contains(&"true".to_string()), "Missing true");
    }

    #[test]
    fn test_correlation_key_uses_raw_label() {
        let symbol = BuiltinSymbol::new("push__list_item", SymbolKind::Function);
        assert_eq!(symbol.correlation_key(), "push__list_item_3");
    }

    #[test]
    fn test_symbol_kind_codes() {
        assert_eq!(SymbolKind::Function.code(), 3);
        assert_eq!(SymbolKind::Variable.code(), 6);
        assert_eq!(SymbolKind::Keyword.code(), 14);
        assert_eq!(SymbolKind::Constant.code(), 21);
        assert_eq!(SymbolKind::Function.as_str(), "function");
    }

    #[test]
    fn test_find_by_key() {
        let table = default_table();
        let found = table.find_by_key("print_3").unwrap();
        assert_eq!(found.label, "print");
        assert!(table.find_by_key("print_14").is_none());
        assert!(table.find_by_key("garbage").is_none());
    }

    #[test]
    fn test_duplicate_keys_detected() {
        let table = BuiltinTable::new(vec![
            BuiltinSymbol::new("f", SymbolKind::Function),
            BuiltinSymbol::new("f", SymbolKind::Function),
            BuiltinSymbol::new("f", SymbolKind::Function),
            BuiltinSymbol::new("f", SymbolKind::Keyword),
        ]);
        assert_eq!(table.duplicate_keys(), vec!["f_3".to_string()]);
    }

    #[test]
    fn test_duplicate_visible_labels_detected() {
        let table = BuiltinTable::new(vec![
            BuiltinSymbol::new("len__list", SymbolKind::Function),
            BuiltinSymbol::new("len__text", SymbolKind::Function),
            BuiltinSymbol::new("len", SymbolKind::Keyword),
        ]);

        assert!(table.duplicate_keys().is_empty());
        assert_eq!(
            table.duplicate_labels(),
            vec![("len".to_string(), SymbolKind::Function)]
        );
    }

    #[test]
    fn test_from_json_both_documentation_shapes() {
        let json = r#"[
            {"label": "print", "kind": "function", "detail": "(value: str)", "documentation": "Prints."},
            {"label": "PI", "kind": "constant", "documentation": {"kind": "markdown", "value": "**pi**"}},
            {"label": "if", "kind": "keyword"}
        ]"#;

        let table = BuiltinTable::from_json(json).unwrap();
        assert_eq!(table.len(), 3);

        let symbols = table.symbols();
        assert_eq!(symbols[0].kind, SymbolKind::Function);
        assert_eq!(symbols[0].detail.as_deref(), Some("(value: str)"));
        assert_eq!(
            symbols[0].documentation,
            Some(Documentation::Text("Prints.".to_string()))
        );
        assert_eq!(symbols[1].documentation, Some(Documentation::markdown("**pi**")));
        assert_eq!(symbols[2].detail, None);
        assert_eq!(symbols[2].documentation, None);
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let result = BuiltinTable::from_json(r#"[{"label": "x", "kind": "widget"}]"#);
        assert!(matches!(result, Err(TableError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("builtins.json");
        fs::write(&path, r#"[{"label": "len__list", "kind": "function"}]"#).unwrap();

        let table = BuiltinTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.symbols()[0].decoded().base_label, "len");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = BuiltinTable::load(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(TableError::Io { .. })));
    }
}
