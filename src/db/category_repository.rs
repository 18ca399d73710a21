use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::db::models::RemoteCategory;
use crate::error::AppError;

/// Source of admin-defined property categories.
///
/// Implemented by the MongoDB repository on the server and by the HTTP
/// category client on the consumer side, so both can feed the merge helpers
/// in [`crate::models::category`].
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// List the categories currently marked active.
    async fn active_categories(&self) -> Result<Vec<RemoteCategory>, AppError>;
}

/// Shape of a category document in the `categories` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRecord {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    display_name: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    badge: Option<String>,
    #[serde(default)]
    is_active: bool,
}

impl CategoryRecord {
    fn into_category(self) -> RemoteCategory {
        RemoteCategory {
            id: self.id.to_hex(),
            name: self.name,
            display_name: self.display_name,
            icon: self.icon,
            description: self.description,
            badge: self.badge,
            is_active: self.is_active,
        }
    }
}

/// MongoDB implementation of the CategorySource.
pub struct MongoCategoryRepository {
    collection: mongodb::Collection<CategoryRecord>,
}

impl MongoCategoryRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("categories"),
        }
    }
}

#[async_trait]
impl CategorySource for MongoCategoryRepository {
    async fn active_categories(&self) -> Result<Vec<RemoteCategory>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;

        let cursor = self
            .collection
            .find(doc! { "isActive": true })
            .sort(doc! { "name": 1 })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let records: Vec<CategoryRecord> = cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records.into_iter().map(CategoryRecord::into_category).collect())
    }
}
