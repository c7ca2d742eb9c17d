mod inmemory;
mod postgres;

pub use inmemory::InMemoryDocumentRepo;
pub use postgres::PostgresDocumentRepo;

use beacon_domain::{Document, ID};

/// Read-only view of hub documents; the reminder core only validates links
/// and joins titles/slugs for display. Document CRUD lives elsewhere.
#[async_trait::async_trait]
pub trait IDocumentRepo: Send + Sync {
    async fn insert(&self, document: &Document) -> anyhow::Result<()>;
    async fn find(&self, document_id: &ID) -> Option<Document>;
    async fn find_many(&self, document_ids: &[ID]) -> Vec<Document>;
}
