use async_trait::async_trait;

use crate::db::models::{Audience, InfoPage};
use crate::error::AppError;

/// Repository trait for informational pages.
///
/// `(audience, slug)` identifies a page; nothing else enforces uniqueness.
#[async_trait]
pub trait InfoPageRepository: Send + Sync {
    /// Create a page or update the title and content of the one with the
    /// same audience and slug.
    async fn upsert(&self, page: InfoPage) -> Result<(), AppError>;

    /// Find a single page.
    async fn find(&self, audience: Audience, slug: &str) -> Result<Option<InfoPage>, AppError>;

    /// List all pages for an audience, sorted by slug.
    async fn list(&self, audience: Audience) -> Result<Vec<InfoPage>, AppError>;
}

/// MongoDB implementation of the InfoPageRepository.
pub struct MongoInfoPageRepository {
    collection: mongodb::Collection<InfoPage>,
}

impl MongoInfoPageRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("infopages"),
        }
    }
}

fn audience_bson(audience: Audience) -> String {
    audience.to_string()
}

#[async_trait]
impl InfoPageRepository for MongoInfoPageRepository {
    async fn upsert(&self, page: InfoPage) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::UpdateOptions;

        let filter = doc! { "audience": audience_bson(page.audience), "slug": &page.slug };
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(
                filter,
                doc! { "$set": { "title": &page.title, "content": &page.content } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find(&self, audience: Audience, slug: &str) -> Result<Option<InfoPage>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "audience": audience_bson(audience), "slug": slug })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list(&self, audience: Audience) -> Result<Vec<InfoPage>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        let cursor = self
            .collection
            .find(doc! { "audience": audience_bson(audience) })
            .sort(doc! { "slug": 1 })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
