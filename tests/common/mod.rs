#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use tempfile::TempDir;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::minio::MinIO;
use testcontainers_modules::mongo::Mongo;

use nowstay::app::{build_router, AppState};
use nowstay::db::admin_repository::{AdminRepository, MongoAdminRepository};
use nowstay::db::category_repository::{CategorySource, MongoCategoryRepository};
use nowstay::db::info_page_repository::{InfoPageRepository, MongoInfoPageRepository};
use nowstay::db::models::{Audience, InfoPage, RemoteCategory};
use nowstay::error::AppError;
use nowstay::storage::client::{S3StorageClient, StorageClient};
use nowstay::storage::media::MediaStore;
use nowstay::storage::staging::UploadStaging;

pub const MEDIA_BASE_URL: &str = "https://media.test";

/// Holds running containers and provides the Axum router for integration tests.
///
/// Containers are kept alive for as long as this struct lives. When dropped,
/// containers are stopped and cleaned up automatically.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    _minio: ContainerAsync<MinIO>,
    pub staging_dir: TempDir,
    pub db: mongodb::Database,
    pub router: Router,
    pub state: AppState,
    pub admin_repo: Arc<dyn AdminRepository>,
    pub info_page_repo: Arc<dyn InfoPageRepository>,
    pub storage: Arc<dyn StorageClient>,
}

impl TestEnv {
    /// Spin up MongoDB and MinIO and build an Axum router wired to them.
    pub async fn start() -> Self {
        let (mongo_container, minio_container) =
            tokio::join!(Mongo::default().start(), MinIO::default().start());
        let mongo_container = mongo_container.expect("Failed to start MongoDB container");
        let minio_container = minio_container.expect("Failed to start MinIO container");

        // --- MongoDB ---
        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let db = mongo_client.database("nowstay_test");

        let admin_repo: Arc<dyn AdminRepository> = Arc::new(MongoAdminRepository::new(&db));
        let info_page_repo: Arc<dyn InfoPageRepository> =
            Arc::new(MongoInfoPageRepository::new(&db));
        let category_source: Arc<dyn CategorySource> =
            Arc::new(MongoCategoryRepository::new(&db));

        // --- MinIO (S3) ---
        let minio_port = minio_container
            .get_host_port_ipv4(9000)
            .await
            .expect("Failed to get MinIO port");
        let minio_endpoint = format!("http://127.0.0.1:{}", minio_port);

        // Set env vars for AWS SDK to pick up MinIO credentials
        unsafe {
            std::env::set_var("AWS_ACCESS_KEY_ID", "minioadmin");
            std::env::set_var("AWS_SECRET_ACCESS_KEY", "minioadmin");
            std::env::set_var("AWS_REGION", "us-east-1");
        }

        let bucket_name = "nowstay-test";
        let s3 = S3StorageClient::connect(bucket_name.to_string(), Some(&minio_endpoint)).await;

        // Create test bucket through a raw client
        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .endpoint_url(&minio_endpoint)
            .region(aws_config::Region::new("us-east-1"))
            .load()
            .await;
        let raw_client = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::config::Builder::from(&s3_config)
                .force_path_style(true)
                .build(),
        );
        let _ = raw_client.create_bucket().bucket(bucket_name).send().await;

        let storage: Arc<dyn StorageClient> = Arc::new(s3);

        // --- Staging + AppState ---
        let staging_dir = tempfile::tempdir().expect("Failed to create staging dir");
        let state = AppState {
            info_page_repo: info_page_repo.clone(),
            category_source,
            media: Arc::new(MediaStore::new(storage.clone(), "nowstay", MEDIA_BASE_URL)),
            staging: UploadStaging::new(staging_dir.path()),
        };
        let router = build_router(state.clone());

        Self {
            _mongo: mongo_container,
            _minio: minio_container,
            staging_dir,
            db,
            router,
            state,
            admin_repo,
            info_page_repo,
            storage,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Number of files currently sitting in the staging directory.
    pub fn staged_file_count(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// In-memory stand-ins for the Mongo and S3 backends, for endpoints whose
/// tests do not need real containers.
#[derive(Default)]
pub struct MemoryInfoPages {
    pages: Mutex<Vec<InfoPage>>,
}

#[async_trait]
impl InfoPageRepository for MemoryInfoPages {
    async fn upsert(&self, page: InfoPage) -> Result<(), AppError> {
        let mut pages = self.pages.lock().unwrap();
        pages.retain(|p| !(p.audience == page.audience && p.slug == page.slug));
        pages.push(page);
        Ok(())
    }

    async fn find(&self, audience: Audience, slug: &str) -> Result<Option<InfoPage>, AppError> {
        let pages = self.pages.lock().unwrap();
        Ok(pages
            .iter()
            .find(|p| p.audience == audience && p.slug == slug)
            .cloned())
    }

    async fn list(&self, audience: Audience) -> Result<Vec<InfoPage>, AppError> {
        let mut pages: Vec<InfoPage> = self
            .pages
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.audience == audience)
            .cloned()
            .collect();
        pages.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(pages)
    }
}

#[derive(Default)]
pub struct MemoryCategories {
    pub categories: Vec<RemoteCategory>,
}

#[async_trait]
impl CategorySource for MemoryCategories {
    async fn active_categories(&self) -> Result<Vec<RemoteCategory>, AppError> {
        Ok(self.categories.clone())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl StorageClient for MemoryStorage {
    async fn put_object(
        &self,
        key: &str,
        content: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), AppError> {
        self.objects.lock().unwrap().insert(key.to_string(), content);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn delete_object(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.objects.lock().unwrap().remove(key).is_some())
    }
}

/// Router wired to in-memory backends; no containers are started.
pub struct MemoryEnv {
    pub staging_dir: TempDir,
    pub router: Router,
}

impl MemoryEnv {
    pub fn start() -> Self {
        let staging_dir = tempfile::tempdir().expect("Failed to create staging dir");
        let state = AppState {
            info_page_repo: Arc::new(MemoryInfoPages::default()),
            category_source: Arc::new(MemoryCategories::default()),
            media: Arc::new(MediaStore::new(
                Arc::new(MemoryStorage::default()),
                "nowstay",
                MEDIA_BASE_URL,
            )),
            staging: UploadStaging::new(staging_dir.path()),
        };

        Self {
            router: build_router(state),
            staging_dir,
        }
    }

    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }
}
