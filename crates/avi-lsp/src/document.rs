use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

/// An open document in the LSP server
#[derive(Clone, Debug)]
pub struct Document {
    /// The current text content of the document
    text: String,
    /// Version reported by the client
    version: i32,
}

impl Document {
    pub fn new(text: String, version: i32) -> Self {
        Self { text, version }
    }

    pub fn update_text(&mut self, new_text: String, version: i32) {
        self.text = new_text;
        self.version = version;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> i32 {
        self.version
    }
}

/// Open documents keyed by URI
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, uri: Url, text: String, version: i32) {
        self.documents.insert(uri, Document::new(text, version));
    }

    /// Replace the text of an open document; unknown URIs are ignored
    pub fn update(&self, uri: &Url, text: String, version: i32) {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            doc.update_text(text, version);
        }
    }

    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Copy of the current text, so no map lock is held while completing
    pub fn snapshot(&self, uri: &Url) -> Option<String> {
        self.documents.get(uri).map(|doc| doc.text().to_string())
    }

    pub fn version(&self, uri: &Url) -> Option<i32> {
        self.documents.get(uri).map(|doc| doc.version())
    }
}
