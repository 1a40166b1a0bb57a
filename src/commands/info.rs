use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::render::{format_file_size, TerminalHooks};
use crate::session::ExtractSession;
use crate::tracker::SelectionTracker;

pub async fn run<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let service = super::connect(config)?;
    let mut session = ExtractSession::new(
        SelectionTracker::new(),
        service,
        TerminalHooks::new(),
        config,
    );
    let total_pages = session.load(&path).await?;

    if let Some(document) = session.document() {
        println!("File: {}", path.as_ref().display());
        println!("Size: {}", format_file_size(document.size));
    }
    println!("Pages: {}", total_pages);

    Ok(())
}
