pub mod consent;
pub mod contact;
pub mod extract;
pub mod info;
pub mod merge;
pub mod reorder;
pub mod split;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::service::{HttpPdfService, PdfService};

pub fn connect(config: &Config) -> Result<Arc<dyn PdfService>> {
    let service = HttpPdfService::new(config)
        .with_context(|| format!("Failed to set up client for {}", config.service_url))?;
    Ok(Arc::new(service))
}

/// Fetch a produced file and write it to `output`.
pub async fn download_to<P: AsRef<Path>>(
    service: &dyn PdfService,
    url: &str,
    output: P,
) -> Result<()> {
    let output = output.as_ref();
    let bytes = service
        .download(url)
        .await
        .with_context(|| format!("Failed to download {}", url))?;
    tokio::fs::write(output, &bytes)
        .await
        .with_context(|| format!("Failed to save {}", output.display()))?;
    println!("Saved {} to {}", crate::render::format_file_size(bytes.len() as u64), output.display());
    Ok(())
}
