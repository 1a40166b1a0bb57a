use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::types::{
    Ack, Envelope, ExtractResult, MergeResult, PageInfo, ReorderResult, SplitResult,
};
use super::PdfService;
use crate::config::Config;
use crate::contact::ContactForm;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::split::SplitRequest;

/// [`PdfService`] backed by the web application's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpPdfService {
    client: Client,
    base_url: Url,
}

impl HttpPdfService {
    pub fn new(config: &Config) -> Result<Self> {
        let mut base_url = Url::parse(&config.service_url).map_err(|e| {
            Error::invalid(format!("Invalid service URL {}: {}", config.service_url, e))
        })?;
        // Endpoints are joined relative to the base, so a mount prefix like
        // `/pdfcutter` must end in a slash to survive the join
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(HttpPdfService { client, base_url })
    }

    /// Join `path` onto the service URL. Endpoint names are relative to it;
    /// server-issued links such as `/download/x.pdf` and absolute URLs are
    /// taken as they are.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::invalid(format!("Invalid URL {}: {}", path, e)))
    }

    async fn file_part(document: &PdfDocument) -> Result<Part> {
        let bytes = document.read().await?;
        Part::bytes(bytes)
            .file_name(document.name.clone())
            .mime_str("application/pdf")
            .map_err(Error::from)
    }

    async fn single_file_form(document: &PdfDocument) -> Result<Form> {
        Ok(Form::new().part("file", Self::file_part(document).await?))
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        fallback: &str,
    ) -> Result<T> {
        let url = self.resolve(path)?;
        debug!(%url, "POST");
        let response = self.client.post(url).multipart(form).send().await?;
        Self::read_envelope(response, fallback).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %response.url(), "service request failed");
            return Err(Error::HttpStatus(status.as_u16()));
        }
        let envelope: Envelope<T> = response.json().await?;
        if !envelope.success {
            warn!(error = ?envelope.error, "service reported failure");
        }
        envelope.into_result(fallback)
    }
}

/// Page lists travel as JSON arrays inside a form field.
fn json_list(pages: &[u32]) -> String {
    serde_json::to_string(pages).unwrap_or_else(|_| "[]".to_string())
}

#[async_trait]
impl PdfService for HttpPdfService {
    async fn page_info(&self, document: &PdfDocument) -> Result<u32> {
        let form = Self::single_file_form(document).await?;
        let info: PageInfo = self
            .post_form("get_pdf_info", form, "Failed to read the PDF")
            .await?;
        let total_pages = info
            .total_pages
            .ok_or_else(|| Error::Service("Response did not include a page count".into()))?;
        info!(file = %document.name, total_pages, "loaded page info");
        Ok(total_pages)
    }

    async fn extract(&self, document: &PdfDocument, pages: &[u32]) -> Result<ExtractResult> {
        let form = Self::single_file_form(document)
            .await?
            .text("pages_to_extract", json_list(pages));
        info!(file = %document.name, pages = pages.len(), "extracting pages");
        self.post_form("extract-pages", form, "Failed to extract pages")
            .await
    }

    async fn reorder(&self, document: &PdfDocument, page_order: &[u32]) -> Result<ReorderResult> {
        let form = Self::single_file_form(document)
            .await?
            .text("page_order", json_list(page_order));
        info!(file = %document.name, ?page_order, "reordering pages");
        self.post_form("reorder", form, "Failed to reorder pages")
            .await
    }

    async fn merge(&self, documents: &[PdfDocument]) -> Result<MergeResult> {
        let mut form = Form::new();
        for document in documents {
            form = form.part("files[]", Self::file_part(document).await?);
        }
        info!(files = documents.len(), "merging files");
        self.post_form("merge", form, "Failed to merge files").await
    }

    async fn split(&self, request: &SplitRequest) -> Result<SplitResult> {
        let mut form = Self::single_file_form(&request.document).await?;
        for (name, value) in request.mode.form_fields() {
            form = form.text(name, value);
        }
        info!(file = %request.document.name, split_type = %request.mode.split_type(), "splitting");
        self.post_form("split", form, "Failed to split the PDF")
            .await
    }

    async fn contact(&self, form: &ContactForm) -> Result<()> {
        let url = self.resolve("contact")?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(form).send().await?;
        let _: Ack = Self::read_envelope(response, "Failed to send the message").await?;
        Ok(())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let url = self.resolve(url)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
