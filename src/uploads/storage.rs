use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufReader};
use uuid::Uuid;

/// URL prefix under which stored uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload not found")]
    NotFound,
    #[error("invalid upload name")]
    InvalidName,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    fn from_io(e: std::io::Error) -> Self {
        if e.kind() == ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(e)
        }
    }
}

/// Flat directory of uploaded files.
pub struct UploadStorage {
    base_path: PathBuf,
}

/// A file being written to a temporary location. Nothing is visible under
/// the uploads directory until [`UploadStorage::commit`].
pub struct PendingUpload {
    file: File,
    temp_path: PathBuf,
    size: u64,
}

impl UploadStorage {
    pub fn new(uploads_dir: &Path) -> Self {
        Self {
            base_path: uploads_dir.to_path_buf(),
        }
    }

    fn file_path(&self, stored_name: &str) -> PathBuf {
        self.base_path.join(stored_name)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(Uuid::new_v4().to_string())
    }

    pub async fn begin(&self) -> Result<PendingUpload, UploadError> {
        let temp_path = self.temp_path();
        if let Some(parent) = temp_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = File::create(&temp_path).await?;
        Ok(PendingUpload {
            file,
            temp_path,
            size: 0,
        })
    }

    pub async fn get(&self, stored_name: &str) -> Result<(BufReader<File>, u64), UploadError> {
        validate_stored_name(stored_name)?;
        let path = self.file_path(stored_name);
        let file = File::open(&path).await.map_err(UploadError::from_io)?;

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(UploadError::NotFound);
        }

        Ok((BufReader::new(file), metadata.len()))
    }

    pub async fn delete(&self, stored_name: &str) -> Result<bool, UploadError> {
        validate_stored_name(stored_name)?;
        let path = self.file_path(stored_name);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(UploadError::Io(e)),
        }
    }

    pub async fn commit(
        &self,
        pending: PendingUpload,
        stored_name: &str,
    ) -> Result<u64, UploadError> {
        if let Err(e) = validate_stored_name(stored_name) {
            pending.abort().await;
            return Err(e);
        }

        let PendingUpload {
            mut file,
            temp_path,
            size,
        } = pending;

        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        let final_path = self.file_path(stored_name);
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(UploadError::Io(e));
        }

        Ok(size)
    }
}

impl PendingUpload {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), UploadError> {
        self.file.write_all(chunk).await?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    /// Discards the temporary file.
    pub async fn abort(self) {
        drop(self.file);
        if let Err(e) = fs::remove_file(&self.temp_path).await {
            tracing::warn!(
                "Failed to remove temporary upload {}: {e}",
                self.temp_path.display()
            );
        }
    }
}

/// Longest stored file name, in bytes.
const MAX_NAME_LEN: usize = 255;

/// Longest extension kept intact when a name has to be shortened.
const MAX_EXTENSION_LEN: usize = 16;

/// Name a new upload is stored under: `<epoch-ms>-<original name>`, with the
/// original name reduced to its final path component and characters outside
/// `[A-Za-z0-9._-]` replaced by `_`. Overlong names lose the end of their stem,
/// never their extension.
#[must_use]
pub fn stored_name(original_name: &str, epoch_ms: i64) -> String {
    let safe: String = base_name(original_name)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let safe = if safe.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        safe
    };

    let prefix = format!("{epoch_ms}-");
    let budget = MAX_NAME_LEN.saturating_sub(prefix.len());
    format!("{prefix}{}", truncate_keeping_extension(&safe, budget))
}

// `name` is ASCII here, so byte offsets are char boundaries.
fn truncate_keeping_extension(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        return name.to_string();
    }

    let split = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_EXTENSION_LEN => dot,
        _ => name.len(),
    };
    let (stem, extension) = name.split_at(split);
    let stem_len = max_len.saturating_sub(extension.len()).min(stem.len());
    format!("{}{extension}", &stem[..stem_len])
}

/// Final path component of a client-supplied file name.
#[must_use]
pub fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or_default()
}

#[must_use]
pub fn public_url(stored_name: &str) -> String {
    format!("{UPLOADS_URL_PREFIX}{stored_name}")
}

/// Resolves a public upload URL back to the stored name.
#[must_use]
pub fn stored_name_from_url(url: &str) -> Option<&str> {
    let name = url.strip_prefix(UPLOADS_URL_PREFIX)?;
    validate_stored_name(name).ok()?;
    Some(name)
}

fn validate_stored_name(name: &str) -> Result<(), UploadError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(UploadError::InvalidName);
    }

    if name.starts_with('.') {
        return Err(UploadError::InvalidName);
    }

    const INVALID_CHARS: &[char] = &['/', '\\', '\0', '\n', '\r'];
    if name.chars().any(|c| INVALID_CHARS.contains(&c)) {
        return Err(UploadError::InvalidName);
    }

    Ok(())
}
