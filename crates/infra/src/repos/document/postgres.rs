use super::IDocumentRepo;
use beacon_domain::{Document, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresDocumentRepo {
    pool: PgPool,
}

impl PostgresDocumentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DocumentRaw {
    document_uid: Uuid,
    title: String,
    slug: String,
}

impl From<DocumentRaw> for Document {
    fn from(e: DocumentRaw) -> Self {
        Self {
            id: e.document_uid.into(),
            title: e.title,
            slug: e.slug,
        }
    }
}

#[async_trait::async_trait]
impl IDocumentRepo for PostgresDocumentRepo {
    async fn insert(&self, document: &Document) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents(document_uid, title, slug)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(document.id.inner_ref())
        .bind(&document.title)
        .bind(&document.slug)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, document_id: &ID) -> Option<Document> {
        sqlx::query_as::<_, DocumentRaw>(
            r#"
            SELECT * FROM documents
            WHERE document_uid = $1
            "#,
        )
        .bind(document_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|d| d.into())
    }

    async fn find_many(&self, document_ids: &[ID]) -> Vec<Document> {
        let ids: Vec<Uuid> = document_ids.iter().map(|id| *id.inner_ref()).collect();
        sqlx::query_as::<_, DocumentRaw>(
            r#"
            SELECT * FROM documents
            WHERE document_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|d| d.into())
        .collect()
    }
}
