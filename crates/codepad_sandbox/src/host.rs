use std::path::PathBuf;

use thiserror::Error;

use crate::persist::{write_atomic, PersistError};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to replace preview document: {0}")]
    Persist(#[from] PersistError),
}

/// An isolated rendering surface for user-authored documents.
///
/// `load` discards whatever the surface currently shows and replaces it with
/// a freshly parsed document, so every run starts from a clean global scope —
/// timers and listeners from a previous run cannot fire into the new one.
/// There is no partial update.
pub trait PreviewSurface: Send {
    fn load(&mut self, document: &str) -> Result<(), SurfaceError>;
}

const PREVIEW_FILENAME: &str = "index.html";

/// Surface backed by a file on disk. The embedding webview or browser points
/// at [`DiskSurface::document_path`] and re-renders whenever the file is
/// replaced; script isolation and navigation restrictions are its concern,
/// not this crate's.
pub struct DiskSurface {
    dir: PathBuf,
}

impl DiskSurface {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn document_path(&self) -> PathBuf {
        self.dir.join(PREVIEW_FILENAME)
    }
}

impl PreviewSurface for DiskSurface {
    fn load(&mut self, document: &str) -> Result<(), SurfaceError> {
        write_atomic(&self.dir, PREVIEW_FILENAME, document)?;
        Ok(())
    }
}
