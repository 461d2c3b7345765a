use std::sync::Arc;

use avi_lsp_core::{BuiltinTable, CompleterOptions};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::capabilities;
use crate::document::DocumentStore;
use crate::handlers;

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    builtins: Arc<BuiltinTable>,
    options: CompleterOptions,
    debug: bool,
}

impl Backend {
    pub fn new(
        client: Client,
        builtins: Arc<BuiltinTable>,
        options: CompleterOptions,
        debug: bool,
    ) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            builtins,
            options,
            debug,
        }
    }

    async fn log_debug(&self, message: &str) {
        tracing::debug!("{}", message);
        if self.debug {
            self.client
                .log_message(MessageType::INFO, format!("[DEBUG] {}", message))
                .await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("Initializing Avi LSP server");

        Ok(InitializeResult {
            capabilities: capabilities::server_capabilities(),
            server_info: Some(ServerInfo {
                name: "avi-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("Avi LSP server initialized");
        self.client
            .show_message(MessageType::INFO, "Avi LSP Server is running")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down Avi LSP server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;

        self.log_debug(&format!("Document opened: {}", uri)).await;

        self.documents
            .open(uri, params.text_document.text, params.text_document.version);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        self.log_debug(&format!("Document changed: {} (v{})", uri, version))
            .await;

        // Full sync: the last change holds the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            self.documents.update(&uri, change.text, version);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.log_debug(&format!("Document closed: {}", uri)).await;
        self.documents.close(&uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        self.log_debug(&format!(
            "Completion request at {:?} (v{:?})",
            position,
            self.documents.version(uri)
        ))
        .await;

        let document = self.documents.snapshot(uri);
        let items = handlers::completion::get_completions(
            &self.builtins,
            self.options,
            document.as_deref(),
            position,
        );

        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        self.log_debug(&format!("Resolve completion: {}", item.label))
            .await;

        Ok(handlers::completion::resolve_completion(&self.builtins, item))
    }

    async fn diagnostic(
        &self,
        params: DocumentDiagnosticParams,
    ) -> Result<DocumentDiagnosticReportResult> {
        let document = self.documents.snapshot(&params.text_document.uri);
        Ok(handlers::diagnostics::document_report(document.as_deref()))
    }
}
