use anyhow::{bail, Result};
use std::path::Path;

use crate::config::Config;
use crate::render::TerminalHooks;
use crate::session::ExtractSession;
use crate::tracker::SelectionTracker;

pub async fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    pages: &str,
    output: Option<Q>,
    config: &Config,
) -> Result<()> {
    let service = super::connect(config)?;
    let mut session = ExtractSession::new(
        SelectionTracker::new(),
        service.clone(),
        TerminalHooks::new(),
        config,
    );

    session.load(&input).await?;
    session.update(|tracker| tracker.select_ranges(pages))?;

    if session.tracker().selected_count() == 0 {
        bail!("No pages specified");
    }

    let outcome = session.submit().await?;

    if let Some(output) = output {
        match outcome.downloads().first() {
            Some((_, url)) => super::download_to(service.as_ref(), url, output).await?,
            None => bail!("The service did not return a download link"),
        }
    }

    Ok(())
}
