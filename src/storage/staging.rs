use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::AppError;

/// Per-file upload limit (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for KYC-style document uploads (ID cards, PAN, ...).
const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
];

/// Which filter an upload goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Any `image/*` type.
    Image,
    /// PDFs and the common photo formats.
    Document,
}

impl UploadKind {
    pub fn accepts(&self, mime: &str) -> bool {
        match self {
            UploadKind::Image => mime.starts_with("image/"),
            UploadKind::Document => DOCUMENT_MIME_TYPES.contains(&mime),
        }
    }

    pub fn rejection(&self) -> &'static str {
        match self {
            UploadKind::Image => "Only image files are allowed",
            UploadKind::Document => "Only PDF and image files are allowed",
        }
    }
}

/// Local directory holding uploaded files until they are forwarded to the
/// media store.
#[derive(Debug, Clone)]
pub struct UploadStaging {
    dir: PathBuf,
}

impl UploadStaging {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the staging directory (and parents) if missing.
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Validate an incoming file and write it under a unique name.
    pub async fn stage(
        &self,
        kind: UploadKind,
        original_name: &str,
        mime: &str,
        content: &[u8],
    ) -> Result<PathBuf, AppError> {
        if !kind.accepts(mime) {
            return Err(AppError::BadRequest(kind.rejection().into()));
        }
        if content.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} MB limit",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        self.ensure_dir().await?;
        let path = self.dir.join(staged_file_name(original_name));
        tokio::fs::write(&path, content).await?;

        tracing::debug!("Staged upload '{}' at {}", original_name, path.display());
        Ok(path)
    }
}

/// `<millis>-<random below 1e9>`, the suffix that keeps staged names unique.
pub fn unique_suffix() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..1_000_000_000);
    format!("{millis}-{random}")
}

/// Unique staging name for an uploaded file: the original stem with every
/// run of characters outside `[A-Za-z0-9_-]` collapsed to `-`, a unique
/// suffix, then the original extension stripped to ASCII alphanumerics.
///
/// The result is safe to use as the last segment of a media object key.
pub fn staged_file_name(original: &str) -> String {
    file_name_with_suffix(original, &unique_suffix())
}

fn file_name_with_suffix(original: &str, suffix: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base_path = Path::new(&base);

    let ext: String = base_path
        .extension()
        .map(|e| {
            e.to_string_lossy()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect()
        })
        .unwrap_or_default();
    let stem = base_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if ext.is_empty() {
        format!("{}-{}", dash_unsafe(&stem), suffix)
    } else {
        format!("{}-{}.{}", dash_unsafe(&stem), suffix, ext)
    }
}

fn dash_unsafe(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            in_run = false;
        } else {
            if !in_run {
                out.push('-');
            }
            in_run = true;
        }
    }
    out
}
