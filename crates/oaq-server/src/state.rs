use std::sync::Arc;

use oaq_core::spec::ApiDocument;
use oaq_llm::Chooser;

/// Shared request context: the immutable document and the chooser. Built
/// once at startup; handlers only ever read it.
#[derive(Clone)]
pub struct AppState {
    pub document: Arc<ApiDocument>,
    pub chooser: Arc<Chooser>,
}

impl AppState {
    pub fn new(document: ApiDocument, chooser: Chooser) -> Self {
        Self {
            document: Arc::new(document),
            chooser: Arc::new(chooser),
        }
    }
}
