//! Filesystem blob store for uploaded proof files.
//!
//! Stands in for the external drive service: bytes go under a configured
//! directory and the durable reference handed back is the absolute path.

use crate::errors::{AppError, AppResult};
use crate::store::BlobStore;
use std::fs;
use std::path::PathBuf;

pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, name: &str, bytes: &[u8]) -> AppResult<String> {
        fs::create_dir_all(&self.dir)?;
        // Uploads come from form input; keep only the final path component so
        // a crafted filename cannot escape the blob directory.
        let safe = sanitize_name(name);
        let path = self.dir.join(&safe);
        fs::write(&path, bytes)?;
        path.canonicalize()
            .map(|p| p.to_string_lossy().to_string())
            .map_err(|e| AppError::StoreUnavailable(format!("blob path for '{safe}': {e}")))
    }
}

fn sanitize_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .to_string();
    if base.is_empty() || base == "." || base == ".." {
        "upload.bin".to_string()
    } else {
        base
    }
}
