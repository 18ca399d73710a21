use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use serde::Serialize;

use crate::error::AppError;
use crate::storage::client::StorageClient;
use crate::storage::staging::unique_suffix;

/// Folder used when the caller does not name one.
pub const DEFAULT_FOLDER: &str = "general";

const UPLOAD_FAILED: &str = "Failed to upload file to media storage";
const BASE64_UPLOAD_FAILED: &str = "Failed to upload base64 image to media storage";
const DELETE_FAILED: &str = "Failed to delete image from media storage";

/// Outcome of a successful media upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    /// Public URL the object is served from.
    pub url: String,
    /// Storage key; pass it back to [`MediaStore::delete`].
    pub public_id: String,
    /// File extension, lowercase (`jpg`, `png`, `pdf`, ...).
    pub format: String,
    pub bytes: u64,
}

/// Outcome of a media deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub success: bool,
    pub message: String,
}

/// Remote media storage for property photos and partner documents.
///
/// Objects live under `<root_folder>/<folder>/` in the backing bucket and are
/// served from `public_base_url`.
pub struct MediaStore {
    storage: Arc<dyn StorageClient>,
    root_folder: String,
    public_base_url: String,
}

impl MediaStore {
    pub fn new(
        storage: Arc<dyn StorageClient>,
        root_folder: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            root_folder: root_folder.into().trim_matches('/').to_string(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Forward a staged file to media storage.
    ///
    /// The local file is removed afterwards whether or not the upload worked.
    /// Failures are logged and reported with a generic message.
    pub async fn upload_file(
        &self,
        path: &Path,
        folder: Option<&str>,
        public_id: Option<&str>,
    ) -> Result<UploadResult, AppError> {
        let result = self.put_local_file(path, folder, public_id).await;
        remove_staged_file(path).await;

        result.map_err(|e| {
            tracing::error!("Media upload error for {}: {e}", path.display());
            AppError::Upload(UPLOAD_FAILED.into())
        })
    }

    /// Upload a base64 image, as sent by the mobile camera flow.
    ///
    /// Accepts a full `data:<mime>;base64,<payload>` URI or a bare payload,
    /// which is assumed to be JPEG.
    pub async fn upload_base64(
        &self,
        data: &str,
        folder: Option<&str>,
        public_id: Option<&str>,
    ) -> Result<UploadResult, AppError> {
        let folder = folder.unwrap_or(DEFAULT_FOLDER);
        tracing::info!("Uploading base64 image to folder: {folder}");

        let result = self.put_base64(data, folder, public_id).await;
        match &result {
            Ok(uploaded) => tracing::info!("Upload success: {}", uploaded.url),
            Err(e) => tracing::error!("Base64 media upload error: {e}"),
        }
        result.map_err(|_| AppError::Upload(BASE64_UPLOAD_FAILED.into()))
    }

    /// Delete an object by the `public_id` returned at upload time.
    ///
    /// Only keys this store could have produced are accepted: they must sit
    /// under the root folder and be made of key segments, with at most one
    /// extension on the file name.
    pub async fn delete(&self, public_id: &str) -> Result<DeleteResult, AppError> {
        if !self.is_managed_key(public_id) {
            return Err(AppError::BadRequest(format!(
                "Invalid public id '{}'",
                public_id
            )));
        }

        let deleted = self.storage.delete_object(public_id).await.map_err(|e| {
            tracing::error!("Media delete error for '{public_id}': {e}");
            AppError::Upload(DELETE_FAILED.into())
        })?;

        let message = if deleted {
            "Image deleted successfully"
        } else {
            "Image not found"
        };

        Ok(DeleteResult {
            success: deleted,
            message: message.to_string(),
        })
    }

    async fn put_local_file(
        &self,
        path: &Path,
        folder: Option<&str>,
        public_id: Option<&str>,
    ) -> Result<UploadResult, AppError> {
        let content = tokio::fs::read(path).await?;
        let format = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = match public_id {
            Some(id) => id.to_string(),
            None => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .ok_or_else(|| AppError::BadRequest("Staged file has no name".into()))?,
        };
        let content_type = mime_guess::from_path(path).first_or_octet_stream();

        self.put(folder.unwrap_or(DEFAULT_FOLDER), &name, &format, content, content_type.as_ref())
            .await
    }

    async fn put_base64(
        &self,
        data: &str,
        folder: &str,
        public_id: Option<&str>,
    ) -> Result<UploadResult, AppError> {
        let (mime, payload) = split_data_uri(data)?;
        let content = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| AppError::BadRequest(format!("Invalid base64 payload: {e}")))?;

        let name = public_id.map(str::to_string).unwrap_or_else(unique_suffix);
        self.put(folder, &name, extension_for_mime(mime), content, mime)
            .await
    }

    async fn put(
        &self,
        folder: &str,
        name: &str,
        format: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadResult, AppError> {
        let folder = folder.trim_matches('/');
        if !folder.split('/').all(is_key_segment) {
            return Err(AppError::BadRequest(format!("Invalid folder '{}'", folder)));
        }
        if !is_key_segment(name) {
            return Err(AppError::BadRequest(format!("Invalid public id '{}'", name)));
        }

        let key = self.object_key(folder, name, format);
        let bytes = content.len() as u64;

        self.storage.put_object(&key, content, content_type).await?;

        Ok(UploadResult {
            success: true,
            url: format!("{}/{}", self.public_base_url, key),
            public_id: key,
            format: format.to_string(),
            bytes,
        })
    }

    fn is_managed_key(&self, key: &str) -> bool {
        let rest = if self.root_folder.is_empty() {
            Some(key)
        } else {
            key.strip_prefix(self.root_folder.as_str())
                .and_then(|r| r.strip_prefix('/'))
        };
        let Some(rest) = rest else {
            return false;
        };

        let mut segments: Vec<&str> = rest.split('/').collect();
        let Some(file) = segments.pop() else {
            return false;
        };
        let file_ok = match file.split_once('.') {
            Some((stem, ext)) => {
                is_key_segment(stem)
                    && !ext.is_empty()
                    && ext.chars().all(|c| c.is_ascii_alphanumeric())
            }
            None => is_key_segment(file),
        };

        file_ok && segments.into_iter().all(is_key_segment)
    }

    fn object_key(&self, folder: &str, name: &str, format: &str) -> String {
        let file = if format.is_empty() {
            name.to_string()
        } else {
            format!("{name}.{format}")
        };
        [self.root_folder.as_str(), folder, file.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// A single folder or name component of an object key: non-empty
/// `[A-Za-z0-9_-]`.
pub fn is_key_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

async fn remove_staged_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove staged file {}: {e}", path.display()),
    }
}

/// Split `data:<mime>;base64,<payload>` into its MIME type and payload.
fn split_data_uri(data: &str) -> Result<(&str, &str), AppError> {
    let Some(rest) = data.strip_prefix("data:") else {
        return Ok(("image/jpeg", data));
    };
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::BadRequest("Malformed data URI".into()))?;
    let mime = header.strip_suffix(";base64").ok_or_else(|| {
        AppError::BadRequest("Only base64 data URIs are supported".into())
    })?;
    Ok((mime, payload))
}

fn extension_for_mime(mime: &str) -> &str {
    match mime {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/svg+xml" => "svg",
        other => other
            .split_once('/')
            .map(|(_, sub)| sub)
            .filter(|sub| !sub.is_empty() && sub.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or("bin"),
    }
}
