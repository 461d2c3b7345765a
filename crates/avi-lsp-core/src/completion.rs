//! Completion suggestions for the Avi language
//!
//! Three sources feed a completion request, always in this order:
//!
//! 1. builtins from the [`BuiltinTable`]
//! 2. functions and variables declared in the current document
//! 3. parameters in scope at the cursor
//!
//! Sources are not deduplicated against each other. A user function named
//! like a builtin is offered twice.

use serde::{Deserialize, Serialize};

use crate::builtins::{BuiltinSymbol, BuiltinTable, Documentation, SymbolKind};
use crate::extract::{RegexExtractor, SymbolExtractor};
use crate::scope::{scope_symbols, Position};
use crate::signature::parse_signature_args;
use crate::snippet::make_snippet;

/// How `insert_text` should be interpreted by the editor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertTextFormat {
    PlainText,
    Snippet,
}

/// A single completion suggestion
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSuggestion {
    pub label: String,
    pub kind: SymbolKind,
    pub detail: Option<String>,
    /// Snippet to insert instead of the label
    pub insert_text: Option<String>,
    pub insert_text_format: Option<InsertTextFormat>,
    /// Correlation key of the originating builtin
    pub data: Option<String>,
    pub documentation: Option<Documentation>,
}

impl CompletionSuggestion {
    fn plain(label: String, kind: SymbolKind) -> Self {
        Self {
            label,
            kind,
            detail: None,
            insert_text: None,
            insert_text_format: None,
            data: None,
            documentation: None,
        }
    }

    fn with_snippet(mut self, snippet: String) -> Self {
        self.insert_text = Some(snippet);
        self.insert_text_format = Some(InsertTextFormat::Snippet);
        self
    }
}

/// Switches for optional completion sources
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompleterOptions {
    /// Offer parameters of the functions enclosing the cursor
    pub scope_completions: bool,
}

impl Default for CompleterOptions {
    fn default() -> Self {
        Self {
            scope_completions: true,
        }
    }
}

/// Builds completion lists against one builtin table
pub struct Completer<'t, E = RegexExtractor> {
    table: &'t BuiltinTable,
    extractor: E,
    options: CompleterOptions,
}

impl<'t> Completer<'t, RegexExtractor> {
    pub fn new(table: &'t BuiltinTable) -> Self {
        Self::with_extractor(table, RegexExtractor)
    }
}

impl<'t, E: SymbolExtractor> Completer<'t, E> {
    pub fn with_extractor(table: &'t BuiltinTable, extractor: E) -> Self {
        Self {
            table,
            extractor,
            options: CompleterOptions::default(),
        }
    }

    pub fn options(mut self, options: CompleterOptions) -> Self {
        self.options = options;
        self
    }

    /// Suggestions for a request on `document` at `position`.
    ///
    /// Without a document only builtins are returned. Scope suggestions also
    /// need a position and the `scope_completions` option.
    pub fn complete(
        &self,
        document: Option<&str>,
        position: Option<Position>,
    ) -> Vec<CompletionSuggestion> {
        let mut items = builtin_completions(self.table);
        let builtin_count = items.len();

        if let Some(text) = document {
            items.extend(current_file_completions(&self.extractor, text));

            if let (Some(position), true) = (position, self.options.scope_completions) {
                items.extend(scope_completions(text, position));
            }
        }

        tracing::debug!(
            "Completion: {} builtin, {} from document",
            builtin_count,
            items.len() - builtin_count
        );

        items
    }

    /// Fill in the documentation of a previously returned suggestion.
    ///
    /// Suggestions without a recognisable builtin key come back unchanged.
    pub fn resolve(&self, mut item: CompletionSuggestion) -> CompletionSuggestion {
        let symbol = item.data.as_deref().and_then(|key| self.table.find_by_key(key));

        if let Some(documentation) = symbol.and_then(|s| s.documentation.clone()) {
            item.documentation = Some(documentation);
        }

        item
    }
}

/// Suggestions for every builtin in the table, in table order
pub fn builtin_completions(table: &BuiltinTable) -> Vec<CompletionSuggestion> {
    table.symbols().iter().map(builtin_suggestion).collect()
}

fn builtin_suggestion(symbol: &BuiltinSymbol) -> CompletionSuggestion {
    let decoded = symbol.decoded();

    let mut item = CompletionSuggestion::plain(decoded.base_label.clone(), symbol.kind);
    item.detail = symbol.detail.clone();
    item.data = Some(symbol.correlation_key());

    if symbol.detail.is_some() || !decoded.mandatory_args.is_empty() {
        let signature_args = parse_signature_args(symbol.detail.as_deref());
        item = item.with_snippet(make_snippet(
            &decoded.base_label,
            &decoded.mandatory_args,
            &signature_args,
        ));
    }

    item
}

/// Functions and variables declared in `text`
pub fn current_file_completions<E: SymbolExtractor + ?Sized>(
    extractor: &E,
    text: &str,
) -> Vec<CompletionSuggestion> {
    let functions = extractor.extract_functions(text).into_iter().map(|function| {
        let signature_args = parse_signature_args(Some(function.signature.as_str()));
        let snippet = make_snippet(&function.name, &[], &signature_args);

        let mut item = CompletionSuggestion::plain(function.name, SymbolKind::Function);
        item.detail = Some(function.signature);
        item.with_snippet(snippet)
    });

    let variables = extractor
        .extract_variables(text)
        .into_iter()
        .map(|name| CompletionSuggestion::plain(name, SymbolKind::Variable));

    functions.chain(variables).collect()
}

/// Parameters visible at `position`
pub fn scope_completions(text: &str, position: Position) -> Vec<CompletionSuggestion> {
    scope_symbols(text, position)
        .into_iter()
        .map(|symbol| {
            let mut item = CompletionSuggestion::plain(symbol.name, SymbolKind::Variable);
            item.detail = Some(format!("parameter of {}", symbol.owner));
            item
        })
        .collect()
}
