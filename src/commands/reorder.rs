use anyhow::{anyhow, bail, Result};
use std::path::Path;

use crate::config::Config;
use crate::page_range::parse_page_list;
use crate::render::TerminalHooks;
use crate::session::ReorderSession;
use crate::tracker::{Edit, OrderTracker};

pub struct ReorderOptions<'a> {
    pub order: Option<&'a str>,
    pub moves: &'a [String],
    pub reverse: bool,
}

pub async fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    options: &ReorderOptions<'_>,
    output: Option<Q>,
    config: &Config,
) -> Result<()> {
    let service = super::connect(config)?;
    let mut session = ReorderSession::new(
        OrderTracker::new(),
        service.clone(),
        TerminalHooks::new(),
        config,
    );

    session.load(&input).await?;

    if let Some(order) = options.order {
        let pages = parse_page_list(order)?;
        session.update(|tracker| tracker.apply_order(&pages))?;
    }
    for spec in options.moves {
        let (from, to) = parse_move(spec)?;
        session.dispatch(Edit::Move { from, to })?;
    }
    if options.reverse {
        session.dispatch(Edit::Reverse)?;
    }

    if !session.tracker().is_modified() {
        bail!("The new order is the same as the original; nothing to do");
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

/// Parse "FROM:TO" with 1-based positions into 0-based positions
fn parse_move(spec: &str) -> Result<(usize, usize)> {
    let (from, to) = spec
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid move {:?}, expected FROM:TO", spec))?;
    let position = |s: &str| -> Result<usize> {
        match s.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(anyhow!("Invalid position {:?} in move {:?}", s, spec)),
        }
    };
    Ok((position(from)?, position(to)?))
}
