use super::IDocumentRepo;
use beacon_domain::{Document, ID};
use std::sync::Mutex;

pub struct InMemoryDocumentRepo {
    documents: Mutex<Vec<Document>>,
}

impl InMemoryDocumentRepo {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDocumentRepo for InMemoryDocumentRepo {
    async fn insert(&self, document: &Document) -> anyhow::Result<()> {
        self.documents.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn find(&self, document_id: &ID) -> Option<Document> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == *document_id)
            .cloned()
    }

    async fn find_many(&self, document_ids: &[ID]) -> Vec<Document> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| document_ids.contains(&d.id))
            .cloned()
            .collect()
    }
}
