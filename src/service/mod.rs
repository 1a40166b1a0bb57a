//! The remote PDF service the client delegates all PDF work to.

pub mod http;
#[cfg(test)]
pub mod stub;
pub mod types;

use async_trait::async_trait;

pub use http::HttpPdfService;
pub use types::{ExtractResult, MergeResult, ReorderResult, SplitFile, SplitResult};

use crate::contact::ContactForm;
use crate::document::PdfDocument;
use crate::error::Result;
use crate::split::SplitRequest;

#[async_trait]
pub trait PdfService: Send + Sync {
    /// Total page count of an uploaded file.
    async fn page_info(&self, document: &PdfDocument) -> Result<u32>;

    async fn extract(&self, document: &PdfDocument, pages: &[u32]) -> Result<ExtractResult>;

    /// `page_order` is a one-based permutation of every page.
    async fn reorder(&self, document: &PdfDocument, page_order: &[u32]) -> Result<ReorderResult>;

    async fn merge(&self, documents: &[PdfDocument]) -> Result<MergeResult>;

    async fn split(&self, request: &SplitRequest) -> Result<SplitResult>;

    async fn contact(&self, form: &ContactForm) -> Result<()>;

    /// Fetch a produced file; relative URLs are resolved against the service.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}
