use crate::db::admin_repository::AdminRepository;
use crate::db::models::{AdminRole, AdminUser, DEFAULT_ADMIN_PERMISSIONS};
use crate::error::AppError;

const BCRYPT_COST: u32 = 10;
const SUPER_ADMIN_NAME: &str = "Super Admin";

/// Credentials of the super admin to ensure.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    Updated,
}

/// Ensure the super admin exists with the given password.
///
/// An existing admin (matched by email) gets its password, name, role and
/// active flag reset; its permissions are left alone.
pub async fn seed_admin(
    repo: &dyn AdminRepository,
    seed: &AdminSeed,
) -> Result<SeedOutcome, AppError> {
    let email = seed.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("Admin email cannot be empty".into()));
    }
    if seed.password.is_empty() {
        return Err(AppError::BadRequest("Admin password cannot be empty".into()));
    }

    let existing = repo.find_by_email(email).await?;
    let hashed = hash_password(seed.password.clone()).await?;

    match existing {
        Some(mut admin) => {
            tracing::info!("Admin user already exists. Updating password...");
            admin.password = hashed;
            admin.name = SUPER_ADMIN_NAME.to_string();
            admin.role = AdminRole::Superadmin;
            admin.is_active = true;
            repo.upsert(admin).await?;
            tracing::info!("Admin user updated successfully");
            Ok(SeedOutcome::Updated)
        }
        None => {
            tracing::info!("Creating new admin user...");
            repo.upsert(AdminUser {
                name: SUPER_ADMIN_NAME.to_string(),
                email: email.to_string(),
                password: hashed,
                role: AdminRole::Superadmin,
                is_active: true,
                permissions: DEFAULT_ADMIN_PERMISSIONS
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
            })
            .await?;
            tracing::info!("Admin user seeded successfully");
            Ok(SeedOutcome::Created)
        }
    }
}

async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}
