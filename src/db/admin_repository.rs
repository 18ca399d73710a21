use async_trait::async_trait;

use crate::db::models::AdminUser;
use crate::error::AppError;

/// Repository trait for administrative users.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find an admin by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError>;

    /// Create an admin or update the existing one (matched by email).
    ///
    /// Name, password, role and active flag are always written. Permissions
    /// are only set when the admin is created; fields this crate does not
    /// model are left untouched.
    async fn upsert(&self, admin: AdminUser) -> Result<(), AppError>;
}

/// MongoDB implementation of the AdminRepository.
pub struct MongoAdminRepository {
    collection: mongodb::Collection<AdminUser>,
}

impl MongoAdminRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("admins"),
        }
    }
}

#[async_trait]
impl AdminRepository for MongoAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert(&self, admin: AdminUser) -> Result<(), AppError> {
        use mongodb::bson::{doc, to_bson};
        use mongodb::options::UpdateOptions;

        let role = to_bson(&admin.role).map_err(|e| AppError::Database(e.to_string()))?;
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(
                doc! { "email": &admin.email },
                doc! {
                    "$set": {
                        "name": &admin.name,
                        "password": &admin.password,
                        "role": role,
                        "isActive": admin.is_active,
                    },
                    "$setOnInsert": {
                        "permissions": admin.permissions,
                    },
                },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
