use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A PDF chosen by the user, checked locally before any upload.
///
/// Only the name and size are known here; the page count comes from the
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P, max_size: u64) -> Result<Self> {
        let path = path.as_ref();

        if !has_pdf_extension(path) {
            return Err(Error::invalid(format!(
                "Not a PDF file: {}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(Error::invalid(format!("Not a file: {}", path.display())));
        }
        if metadata.len() > max_size {
            return Err(Error::invalid(format!(
                "{} is too large ({}, limit {})",
                path.display(),
                crate::render::format_file_size(metadata.len()),
                crate::render::format_file_size(max_size)
            )));
        }

        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document.pdf")
            .to_string();

        Ok(PdfDocument {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
        })
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })
    }
}

pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
