use anyhow::Result;
use clap::ValueEnum;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::document::PdfDocument;
use crate::error;
use crate::merge::MergeRequest;
use crate::page_range::parse_page_list;
use crate::render::Outcome;
use crate::service::PdfService;
use crate::session::{ExtractSession, ReorderSession};
use crate::split::{SplitMode, SplitRequest, SplitType};
use crate::tracker::{OrderTracker, SelectionTracker};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExtractRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges to keep (e.g., '1-5,10,15-end')")]
    pub pages: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfReorderRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "New order as a comma-separated list of every 1-based page number (e.g., '3,1,2')")]
    pub order: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "One of 'all', 'range' or 'specific' (default: all)")]
    #[serde(default = "default_split_type")]
    pub split_type: String,
    #[schemars(description = "First page, required for 'range'")]
    #[serde(default)]
    pub start_page: Option<u32>,
    #[schemars(description = "Last page, required for 'range'")]
    #[serde(default)]
    pub end_page: Option<u32>,
    #[schemars(description = "Page ranges, required for 'specific' (e.g., '1-3,5')")]
    #[serde(default)]
    pub specific_pages: Option<String>,
}

fn default_split_type() -> String {
    "all".to_string()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfMergeRequest {
    #[schemars(description = "Paths of the PDF files to merge, in order")]
    pub paths: Vec<String>,
}

#[derive(Clone)]
pub struct PdfServer {
    tool_router: ToolRouter<Self>,
    service: Arc<dyn PdfService>,
    config: Config,
}

impl PdfServer {
    pub fn new(service: Arc<dyn PdfService>, config: Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            service,
            config,
        }
    }

    async fn info(&self, path: &str) -> error::Result<PdfInfoResult> {
        let mut session = ExtractSession::new(
            SelectionTracker::new(),
            self.service.clone(),
            (),
            &self.config,
        );
        let page_count = session.load(path).await?;
        Ok(PdfInfoResult {
            path: path.to_string(),
            page_count,
            size: session.document().map(|d| d.size).unwrap_or_default(),
        })
    }

    async fn extract(&self, req: &PdfExtractRequest) -> error::Result<Outcome> {
        let mut session = ExtractSession::new(
            SelectionTracker::new(),
            self.service.clone(),
            (),
            &self.config,
        );
        session.load(&req.path).await?;
        session.update(|tracker| tracker.select_ranges(&req.pages))?;
        session.submit().await
    }

    async fn reorder(&self, req: &PdfReorderRequest) -> error::Result<Outcome> {
        let pages = parse_page_list(&req.order)?;
        let mut session = ReorderSession::new(
            OrderTracker::new(),
            self.service.clone(),
            (),
            &self.config,
        );
        session.load(&req.path).await?;
        session.update(|tracker| tracker.apply_order(&pages))?;
        session.submit().await
    }

    async fn split(&self, req: &PdfSplitRequest) -> error::Result<Outcome> {
        let split_type = SplitType::from_str(&req.split_type, true)
            .map_err(|_| error::Error::invalid(format!("Unknown split type: {}", req.split_type)))?;
        let mode = SplitMode::from_inputs(
            split_type,
            req.start_page,
            req.end_page,
            req.specific_pages.as_deref(),
        )?;
        let document = PdfDocument::open(&req.path, self.config.max_file_size)?;
        let request = SplitRequest { document, mode };
        let result = request.submit(self.service.as_ref()).await?;
        Ok(Outcome::Split(result))
    }

    async fn merge(&self, req: &PdfMergeRequest) -> error::Result<Outcome> {
        let request = MergeRequest::from_paths(&req.paths, &self.config)?;
        request.validate(&self.config)?;
        let result = self.service.merge(request.files()).await?;
        Ok(Outcome::Merge {
            file_count: request.files().len(),
            result,
        })
    }
}

fn to_json<T: Serialize>(result: error::Result<T>) -> String {
    match result {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("Error: {}", e)),
        Err(e) => format!("Error: {}", e),
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Upload a PDF to the service and report its page count and file size")]
    async fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        to_json(self.info(&path).await)
    }

    #[tool(description = "Extract specific pages from a PDF through the service. Use page range syntax like '1-5,10,15-end'. Returns a download URL.")]
    async fn pdf_extract(&self, Parameters(req): Parameters<PdfExtractRequest>) -> String {
        to_json(self.extract(&req).await)
    }

    #[tool(description = "Reorder the pages of a PDF through the service. The order must list every page exactly once. Returns a download URL.")]
    async fn pdf_reorder(&self, Parameters(req): Parameters<PdfReorderRequest>) -> String {
        to_json(self.reorder(&req).await)
    }

    #[tool(description = "Split a PDF into one file per page: all pages, a start-end range, or specific pages. Returns one download URL per page.")]
    async fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        to_json(self.split(&req).await)
    }

    #[tool(description = "Merge two or more PDFs, in the given order, into one file. Returns a download URL.")]
    async fn pdf_merge(&self, Parameters(req): Parameters<PdfMergeRequest>) -> String {
        to_json(self.merge(&req).await)
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub size: u64,
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF tools backed by the pdfcutter web service. Use pdf_info to get the page \
                 count, pdf_extract to keep selected pages, pdf_reorder to change page order, \
                 pdf_split to produce one file per page, and pdf_merge to combine files."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(service: Arc<dyn PdfService>, config: Config) -> Result<()> {
    let server = PdfServer::new(service, config);

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
