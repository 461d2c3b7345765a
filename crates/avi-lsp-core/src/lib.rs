//! Core completion engine for the Avi language
//!
//! This crate holds everything the language server needs to answer
//! completion requests, independent of the protocol layer.
//!
//! # Features
//!
//! - **Builtins**: the Avi builtin table, including the `name__arg_arg`
//!   label convention for mandatory arguments
//! - **Snippets**: call snippets with one named tab stop per argument
//! - **Extraction**: functions and variables declared in a document
//! - **Scope**: parameters of the functions enclosing the cursor
//!
//! # Example
//!
//! ```
//! use avi_lsp_core::{default_table, Completer, Position};
//!
//! let completer = Completer::new(default_table());
//! let text = "fn add(a: int, b: int) {\n  \n}\n";
//! let items = completer.complete(Some(text), Some(Position::new(1, 2)));
//!
//! assert!(items.iter().any(|item| item.label == "add"));
//! ```

pub mod builtins;
pub mod completion;
pub mod extract;
pub mod label;
pub mod scope;
pub mod signature;
pub mod snippet;

// Re-export main types for convenience
pub use builtins::{
    default_table, BuiltinSymbol, BuiltinTable, Documentation, MarkupKind, SymbolKind, TableError,
};
pub use completion::{
    builtin_completions, current_file_completions, scope_completions, Completer,
    CompleterOptions, CompletionSuggestion, InsertTextFormat,
};
pub use extract::{RegexExtractor, SymbolExtractor, WorkspaceFunction};
pub use label::{decode_label, DecodedLabel};
pub use scope::{Position, ScopeSymbol};
pub use signature::{arg_name, extract_arg_names, parse_signature_args};
pub use snippet::make_snippet;
