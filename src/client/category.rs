use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{Access, ApiClient, ClientError};
use crate::db::category_repository::CategorySource;
use crate::db::models::RemoteCategory;
use crate::error::AppError;

/// The category endpoint has shipped both a bare array and wrapped payloads.
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoriesPayload {
    Bare(Vec<RemoteCategory>),
    Data { data: Vec<RemoteCategory> },
    Categories { categories: Vec<RemoteCategory> },
}

impl CategoriesPayload {
    fn into_inner(self) -> Vec<RemoteCategory> {
        match self {
            CategoriesPayload::Bare(list)
            | CategoriesPayload::Data { data: list }
            | CategoriesPayload::Categories { categories: list } => list,
        }
    }
}

/// Client for the remote category service.
#[derive(Clone)]
pub struct CategoryClient {
    api: ApiClient,
}

impl CategoryClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the categories marked active by an admin.
    pub async fn fetch_active(&self) -> Result<Vec<RemoteCategory>, ClientError> {
        let payload: CategoriesPayload = self.api.get("categories/active", Access::Session).await?;
        Ok(payload.into_inner())
    }
}

#[async_trait]
impl CategorySource for CategoryClient {
    async fn active_categories(&self) -> Result<Vec<RemoteCategory>, AppError> {
        Ok(self.fetch_active().await?)
    }
}
