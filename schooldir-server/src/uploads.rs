//! Uploaded image storage
//!
//! Images are written under the public image directory as
//! `<unix millis>_<8 hex>_<sanitized original name>` and referenced from the
//! database by their public path (`/schoolImages/<file name>`).
//! Files are opened create-new, so two uploads never share a file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::IMAGE_URL_PREFIX;

/// Fallback when nothing usable survives sanitizing
const FALLBACK_NAME: &str = "image";

/// Longest sanitized name kept (the stored path must fit VARCHAR(255))
const MAX_NAME_LEN: usize = 200;

/// Attempts before giving up on finding a free file name
const MAX_ATTEMPTS: usize = 3;

/// Upload error type
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not find a free file name after {0} attempts")]
    Exhausted(usize),
}

/// An image written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Absolute or working-directory-relative location on disk
    pub path: PathBuf,
    /// Public path stored in the database
    pub url: String,
}

/// Writes uploaded images into a single directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist an upload, creating the directory if needed.
    pub async fn save(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredImage, UploadError> {
        fs::create_dir_all(&self.dir).await?;

        for _ in 0..MAX_ATTEMPTS {
            let file_name = stored_file_name(original_name, Utc::now(), &random_suffix());
            let path = self.dir.join(&file_name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(file = %file_name, "Image name taken, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_all(&mut file, bytes).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e.into());
            }

            tracing::info!(file = %file_name, bytes = bytes.len(), "Stored uploaded image");
            return Ok(StoredImage {
                path,
                url: format!("{}/{}", IMAGE_URL_PREFIX, file_name),
            });
        }

        Err(UploadError::Exhausted(MAX_ATTEMPTS))
    }

    /// Remove a stored image, logging instead of failing.
    pub async fn discard(&self, image: &StoredImage) {
        if let Err(e) = fs::remove_file(&image.path).await {
            tracing::warn!(path = %image.path.display(), error = %e, "Failed to remove orphaned image");
        }
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_owned()
}

/// Build the on-disk name for an upload.
pub fn stored_file_name(original_name: Option<&str>, now: DateTime<Utc>, suffix: &str) -> String {
    format!(
        "{}_{}_{}",
        now.timestamp_millis(),
        suffix,
        sanitize_file_name(original_name)
    )
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// # Rules
/// - Only the final path component is kept (both `/` and `\` separate)
/// - Whitespace runs become `_`
/// - Characters outside `[A-Za-z0-9._-]` are dropped
/// - Leading dots are stripped
/// - Empty results fall back to `image`
pub fn sanitize_file_name(original_name: Option<&str>) -> String {
    let raw = original_name.unwrap_or_default();
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    // ASCII only at this point, so byte slicing is safe; keep the tail for the extension
    let start = cleaned.len().saturating_sub(MAX_NAME_LEN);
    cleaned[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn sanitize_replaces_whitespace() {
        assert_eq!(
            sanitize_file_name(Some("my school  photo.jpg")),
            "my_school_photo.jpg"
        );
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name(Some("../../etc/passwd")), "passwd");
        assert_eq!(sanitize_file_name(Some(r"C:\Users\me\logo.png")), "logo.png");
    }

    #[test]
    fn sanitize_falls_back() {
        assert_eq!(sanitize_file_name(None), "image");
        assert_eq!(sanitize_file_name(Some("")), "image");
        assert_eq!(sanitize_file_name(Some("...")), "image");
        assert_eq!(sanitize_file_name(Some("école✓")), "cole");
    }

    #[test]
    fn sanitize_caps_length_keeping_extension() {
        let long = format!("{}.png", "a".repeat(400));
        let name = sanitize_file_name(Some(&long));
        assert_eq!(name.len(), MAX_NAME_LEN);
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn stored_name_has_timestamp_prefix() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            stored_file_name(Some("front gate.png"), now, "deadbeef"),
            "1700000000123_deadbeef_front_gate.png"
        );
    }

    #[tokio::test]
    async fn save_creates_directory_and_file() {
        let tmp = TempDir::new().unwrap();
        let store = ImageStore::new(tmp.path().join("public").join("schoolImages"));

        let image = store.save(Some("campus.jpg"), b"jpeg bytes").await.unwrap();

        assert!(image.url.starts_with("/schoolImages/"));
        assert!(image.url.ends_with("_campus.jpg"));
        assert_eq!(std::fs::read(&image.path).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn same_original_name_gets_distinct_files() {
        let tmp = TempDir::new().unwrap();
        let store = ImageStore::new(tmp.path());

        let (a, b) = tokio::join!(
            store.save(Some("logo.png"), b"one"),
            store.save(Some("logo.png"), b"two"),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.path, b.path);
        assert_eq!(std::fs::read(&a.path).unwrap(), b"one");
        assert_eq!(std::fs::read(&b.path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn discard_removes_file() {
        let tmp = TempDir::new().unwrap();
        let store = ImageStore::new(tmp.path());
        let image = store.save(Some("x.png"), b"x").await.unwrap();

        store.discard(&image).await;
        assert!(!image.path.exists());

        // second discard only logs
        store.discard(&image).await;
    }
}
