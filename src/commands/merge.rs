use anyhow::{bail, Result};
use std::path::Path;

use crate::config::Config;
use crate::merge::MergeRequest;
use crate::render::{Hooks, Outcome, TerminalHooks};

pub async fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    inputs: &[P],
    output: Option<Q>,
    config: &Config,
) -> Result<()> {
    let request = MergeRequest::from_paths(inputs, config)?;
    request.validate(config)?;

    let service = super::connect(config)?;
    let mut hooks = TerminalHooks::new();

    hooks.set_loading(true);
    let result = service.merge(request.files()).await;
    hooks.set_loading(false);

    let outcome = Outcome::Merge {
        file_count: request.files().len(),
        result: result?,
    };
    hooks.show_result(&outcome);

    if let Some(output) = output {
        match outcome.downloads().first() {
            Some((_, url)) => super::download_to(service.as_ref(), url, output).await?,
            None => bail!("The service did not return a download link"),
        }
    }

    Ok(())
}
