//! One page-level flow (extract or reorder) bound to a document, a service
//! and a set of result hooks.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::render::{Hooks, Outcome};
use crate::service::PdfService;
use crate::tracker::{Edit, Event, Flow, OrderTracker, Phase, SelectionTracker, Tracker};

/// How a tracker's submission is sent to the service.
#[async_trait]
pub trait Submit: Tracker + Send + Sync {
    async fn send(
        &self,
        service: &dyn PdfService,
        document: &PdfDocument,
        pages: &[u32],
    ) -> Result<Outcome>;
}

#[async_trait]
impl Submit for SelectionTracker {
    async fn send(
        &self,
        service: &dyn PdfService,
        document: &PdfDocument,
        pages: &[u32],
    ) -> Result<Outcome> {
        service.extract(document, pages).await.map(Outcome::Extract)
    }
}

#[async_trait]
impl Submit for OrderTracker {
    async fn send(
        &self,
        service: &dyn PdfService,
        document: &PdfDocument,
        pages: &[u32],
    ) -> Result<Outcome> {
        let result = service.reorder(document, pages).await?;
        Ok(Outcome::Reorder {
            total_pages: self.total_pages(),
            moved_pages: self.moved_count(),
            result,
        })
    }
}

pub type ExtractSession<H> = Session<SelectionTracker, H>;
pub type ReorderSession<H> = Session<OrderTracker, H>;

pub struct Session<T, H> {
    flow: Flow<T>,
    document: Option<PdfDocument>,
    service: Arc<dyn PdfService>,
    hooks: H,
    max_file_size: u64,
}

impl<T: Submit, H: Hooks> Session<T, H> {
    pub fn new(tracker: T, service: Arc<dyn PdfService>, hooks: H, config: &Config) -> Self {
        Session {
            flow: Flow::new(tracker),
            document: None,
            service,
            hooks,
            max_file_size: config.max_file_size,
        }
    }

    pub fn phase(&self) -> Phase {
        self.flow.phase()
    }

    pub fn tracker(&self) -> &T {
        self.flow.tracker()
    }

    pub fn document(&self) -> Option<&PdfDocument> {
        self.document.as_ref()
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn last_error(&self) -> Option<&str> {
        self.flow.last_error()
    }

    /// Choose a new file and ask the service for its page count.
    ///
    /// Any previous document is dropped first, so a failed load leaves the
    /// session empty.
    pub async fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<u32> {
        if self.phase() == Phase::Submitting {
            return Err(self.report(Error::SubmissionInFlight));
        }
        self.clear()?;

        let document = match PdfDocument::open(path, self.max_file_size) {
            Ok(document) => document,
            Err(e) => return Err(self.report(e)),
        };

        self.hooks.set_loading(true);
        let result = self.service.page_info(&document).await;
        self.hooks.set_loading(false);

        match result {
            Ok(total_pages) => {
                self.flow.dispatch(Event::Load(total_pages))?;
                self.document = Some(document);
                Ok(total_pages)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.flow.dispatch(Event::Clear)?;
        self.document = None;
        Ok(())
    }

    pub fn dispatch(&mut self, edit: Edit) -> Result<Phase> {
        self.flow.dispatch(Event::Edit(edit))
    }

    /// Apply a validated bulk edit to the tracker.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        self.flow.update(f)
    }

    /// First half of a submission: check local preconditions, mark the
    /// session in flight and hand back the payload to send.
    pub fn begin_submit(&mut self) -> Result<Vec<u32>> {
        if self.document.is_none() {
            return Err(self.report(Error::NoDocument));
        }
        if let Err(e) = self.flow.dispatch(Event::Submit) {
            return Err(self.report(e));
        }
        self.hooks.set_loading(true);
        Ok(self.flow.in_flight().map(<[u32]>::to_vec).unwrap_or_default())
    }

    /// Second half: record how the request ended and leave the session
    /// actionable again.
    pub fn finish_submit(&mut self, result: Result<Outcome>) -> Result<Outcome> {
        self.hooks.set_loading(false);
        match result {
            Ok(outcome) => {
                self.flow.dispatch(Event::Succeeded)?;
                self.hooks.show_result(&outcome);
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.flow.dispatch(Event::Failed(e.to_string()))?;
                self.hooks.show_error(&e.to_string());
                Err(e)
            }
        }
    }

    pub async fn submit(&mut self) -> Result<Outcome> {
        let pages = self.begin_submit()?;
        let result = match &self.document {
            Some(document) => {
                info!(file = %document.name, pages = pages.len(), "submitting");
                self.flow
                    .tracker()
                    .send(self.service.as_ref(), document, &pages)
                    .await
            }
            None => Err(Error::NoDocument),
        };
        self.finish_submit(result)
    }

    fn report(&mut self, e: Error) -> Error {
        if e.is_local() {
            debug!(error = %e, "rejected locally");
        } else {
            warn!(error = %e, "request failed");
        }
        self.hooks.show_error(&e.to_string());
        e
    }
}
