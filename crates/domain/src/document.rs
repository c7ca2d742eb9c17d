use crate::shared::entity::{Entity, ID};

/// A markdown document on the hub. The reminder core only needs enough of
/// it to validate links and enrich reminder reads with a title and slug.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: ID,
    pub title: String,
    pub slug: String,
}

impl Entity for Document {
    fn id(&self) -> &ID {
        &self.id
    }
}
