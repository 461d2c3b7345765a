use avi_lsp_core::{
    BuiltinTable, Completer, CompleterOptions, CompletionSuggestion,
    Documentation as CoreDocumentation, InsertTextFormat as CoreInsertTextFormat,
    MarkupKind as CoreMarkupKind, Position as CorePosition, SymbolKind,
};
use tower_lsp::lsp_types::*;

/// Get completion items for a document (if open) at a position
pub fn get_completions(
    table: &BuiltinTable,
    options: CompleterOptions,
    document: Option<&str>,
    position: Position,
) -> Vec<CompletionItem> {
    let position = CorePosition::new(position.line, position.character);

    Completer::new(table)
        .options(options)
        .complete(document, Some(position))
        .into_iter()
        .map(convert_to_lsp_completion)
        .collect()
}

/// Attach documentation to an item returned earlier.
///
/// Only `documentation` is taken from the core; every other field of the
/// client's item is returned as sent.
pub fn resolve_completion(table: &BuiltinTable, mut item: CompletionItem) -> CompletionItem {
    let resolved = Completer::new(table).resolve(convert_from_lsp_completion(&item));

    if let Some(documentation) = resolved.documentation {
        item.documentation = Some(convert_documentation(documentation));
    }

    item
}

/// Convert a core suggestion to an LSP completion item
fn convert_to_lsp_completion(suggestion: CompletionSuggestion) -> CompletionItem {
    CompletionItem {
        label: suggestion.label,
        kind: Some(convert_kind(suggestion.kind)),
        detail: suggestion.detail,
        documentation: suggestion.documentation.map(convert_documentation),
        insert_text: suggestion.insert_text,
        insert_text_format: suggestion.insert_text_format.map(|format| match format {
            CoreInsertTextFormat::Snippet => InsertTextFormat::SNIPPET,
            CoreInsertTextFormat::PlainText => InsertTextFormat::PLAIN_TEXT,
        }),
        data: suggestion.data.map(serde_json::Value::String),
        ..Default::default()
    }
}

/// Rebuild the core view of a client item, enough for resolve
fn convert_from_lsp_completion(item: &CompletionItem) -> CompletionSuggestion {
    CompletionSuggestion {
        label: item.label.clone(),
        kind: item.kind.and_then(kind_from_lsp).unwrap_or(SymbolKind::Variable),
        detail: item.detail.clone(),
        insert_text: item.insert_text.clone(),
        insert_text_format: item.insert_text_format.map(|format| {
            if format == InsertTextFormat::SNIPPET {
                CoreInsertTextFormat::Snippet
            } else {
                CoreInsertTextFormat::PlainText
            }
        }),
        data: item
            .data
            .as_ref()
            .and_then(|data| data.as_str())
            .map(str::to_string),
        documentation: None,
    }
}

fn convert_kind(kind: SymbolKind) -> CompletionItemKind {
    match kind {
        SymbolKind::Method => CompletionItemKind::METHOD,
        SymbolKind::Function => CompletionItemKind::FUNCTION,
        SymbolKind::Variable => CompletionItemKind::VARIABLE,
        SymbolKind::Type => CompletionItemKind::CLASS,
        SymbolKind::Module => CompletionItemKind::MODULE,
        SymbolKind::Keyword => CompletionItemKind::KEYWORD,
        SymbolKind::Snippet => CompletionItemKind::SNIPPET,
        SymbolKind::Constant => CompletionItemKind::CONSTANT,
    }
}

fn kind_from_lsp(kind: CompletionItemKind) -> Option<SymbolKind> {
    [
        SymbolKind::Method,
        SymbolKind::Function,
        SymbolKind::Variable,
        SymbolKind::Type,
        SymbolKind::Module,
        SymbolKind::Keyword,
        SymbolKind::Snippet,
        SymbolKind::Constant,
    ]
    .into_iter()
    .find(|k| convert_kind(*k) == kind)
}

fn convert_documentation(documentation: CoreDocumentation) -> Documentation {
    match documentation {
        CoreDocumentation::Text(text) => Documentation::String(text),
        CoreDocumentation::Markup { kind, value } => Documentation::MarkupContent(MarkupContent {
            kind: match kind {
                CoreMarkupKind::Markdown => MarkupKind::Markdown,
                CoreMarkupKind::PlainText => MarkupKind::PlainText,
            },
            value,
        }),
    }
}
