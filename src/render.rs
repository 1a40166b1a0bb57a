//! Result surfaces: the hooks a session reports through, and the terminal
//! implementation used by the CLI.

use std::path::Path;

use serde::Serialize;

use crate::service::types::{ExtractResult, MergeResult, ReorderResult, SplitResult};

/// What a finished submission produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Extract(ExtractResult),
    Reorder {
        total_pages: u32,
        moved_pages: usize,
        #[serde(flatten)]
        result: ReorderResult,
    },
    Merge {
        file_count: usize,
        #[serde(flatten)]
        result: MergeResult,
    },
    Split(SplitResult),
}

impl Outcome {
    /// Every file the service produced, with a suggested local name.
    ///
    /// Names reported by the service are reduced to their final component,
    /// so joining them onto an output directory stays inside it.
    pub fn downloads(&self) -> Vec<(String, String)> {
        match self {
            Outcome::Extract(r) => single("extracted.pdf", r.download_url.as_deref()),
            Outcome::Reorder { result, .. } => {
                single("reordered.pdf", result.download_url.as_deref())
            }
            Outcome::Merge { result, .. } => single(
                &local_file_name(result.filename.as_deref(), "merged_document.pdf"),
                result.download_url.as_deref(),
            ),
            Outcome::Split(r) => r
                .files
                .iter()
                .map(|f| {
                    let fallback = format!("page_{}.pdf", f.page);
                    (
                        local_file_name(Some(&f.filename), &fallback),
                        f.download_url.clone(),
                    )
                })
                .collect(),
        }
    }
}

/// Last path component of a service-supplied name, or `fallback` when the
/// name has none (empty, `..`, a bare root).
pub fn local_file_name(name: Option<&str>, fallback: &str) -> String {
    name.map(|name| name.replace('\\', "/"))
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .unwrap_or(fallback)
        .to_string()
}

fn single(name: &str, url: Option<&str>) -> Vec<(String, String)> {
    url.map(|url| vec![(name.to_string(), url.to_string())])
        .unwrap_or_default()
}

/// Callbacks a host provides to show progress and results.
pub trait Hooks: Send {
    fn set_loading(&mut self, _loading: bool) {}
    fn show_result(&mut self, _outcome: &Outcome) {}
    fn show_error(&mut self, _message: &str) {}
}

impl Hooks for () {}

/// Prints results to stdout. Errors are left to the caller, which reports
/// them once on exit.
#[derive(Debug, Default)]
pub struct TerminalHooks {
    loading: bool,
}

impl TerminalHooks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hooks for TerminalHooks {
    fn set_loading(&mut self, loading: bool) {
        if loading && !self.loading {
            eprintln!("Processing...");
        }
        self.loading = loading;
    }

    fn show_result(&mut self, outcome: &Outcome) {
        println!("{}", describe(outcome));
    }
}

/// Human-readable summary of an outcome.
pub fn describe(outcome: &Outcome) -> String {
    let mut lines = Vec::new();
    match outcome {
        Outcome::Extract(r) => {
            if let Some(message) = &r.message {
                lines.push(message.clone());
            }
            if let Some(pages) = r.extracted_pages {
                lines.push(format!("Extracted {} page(s)", pages));
            }
            push_url(&mut lines, r.download_url.as_deref());
        }
        Outcome::Reorder {
            total_pages,
            moved_pages,
            result,
        } => {
            lines.push(format!("Reordered a {}-page PDF", total_pages));
            lines.push(format!("Pages moved: {}", moved_pages));
            push_url(&mut lines, result.download_url.as_deref());
        }
        Outcome::Merge { file_count, result } => {
            lines.push(format!("Merged {} files", file_count));
            if let Some(filename) = &result.filename {
                lines.push(format!("File: {}", filename));
            }
            push_url(&mut lines, result.download_url.as_deref());
        }
        Outcome::Split(r) => {
            if let Some(message) = &r.message {
                lines.push(message.clone());
            }
            for file in &r.files {
                lines.push(format!(
                    "p{}: {} ({})",
                    file.page, file.filename, file.download_url
                ));
            }
            if let Some(zip) = &r.zip_url {
                lines.push(format!("All pages (ZIP): {}", zip));
            }
        }
    }
    lines.join("\n")
}

fn push_url(lines: &mut Vec<String>, url: Option<&str>) {
    if let Some(url) = url {
        lines.push(format!("Download: {}", url));
    }
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut exp = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exp < UNITS.len() - 1 {
        value /= 1024.0;
        exp += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exp])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::types::SplitFile;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }

    #[test]
    fn test_describe_reorder() {
        let outcome = Outcome::Reorder {
            total_pages: 4,
            moved_pages: 4,
            result: ReorderResult {
                message: None,
                download_url: Some("/download/r.pdf".into()),
            },
        };
        assert_eq!(
            describe(&outcome),
            "Reordered a 4-page PDF\nPages moved: 4\nDownload: /download/r.pdf"
        );
    }

    #[test]
    fn test_downloads() {
        let split = Outcome::Split(SplitResult {
            message: None,
            files: vec![SplitFile {
                filename: "a_page_2.pdf".into(),
                download_url: "/download/u_a_page_2.pdf".into(),
                page: 2,
            }],
            zip_url: None,
        });
        assert_eq!(
            split.downloads(),
            vec![("a_page_2.pdf".to_string(), "/download/u_a_page_2.pdf".to_string())]
        );

        let merge = Outcome::Merge {
            file_count: 2,
            result: MergeResult::default(),
        };
        assert!(merge.downloads().is_empty());
    }

    #[test]
    fn test_downloads_stay_inside_output_dir() {
        let file = |filename: &str, page| SplitFile {
            filename: filename.into(),
            download_url: format!("/download/{}", page),
            page,
        };
        let split = Outcome::Split(SplitResult {
            message: None,
            files: vec![
                file("../escaped.pdf", 1),
                file("/etc/absolute.pdf", 2),
                file("..", 3),
                file("", 4),
                file("..\\windows.pdf", 5),
            ],
            zip_url: None,
        });
        let names: Vec<String> = split.downloads().into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            ["escaped.pdf", "absolute.pdf", "page_3.pdf", "page_4.pdf", "windows.pdf"]
        );

        let merge = Outcome::Merge {
            file_count: 2,
            result: MergeResult {
                message: None,
                filename: Some("../../merged.pdf".into()),
                download_url: Some("/download/m.pdf".into()),
            },
        };
        assert_eq!(merge.downloads()[0].0, "merged.pdf");
    }

    #[test]
    fn test_outcome_json() {
        let outcome = Outcome::Extract(ExtractResult {
            message: None,
            extracted_pages: Some(2),
            download_url: None,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "extract");
        assert_eq!(json["extracted_pages"], 2);
    }
}
