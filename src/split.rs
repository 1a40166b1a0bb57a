use std::fmt;

use clap::ValueEnum;
use tracing::debug;

use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::page_range::{expand_page_set, parse_page_ranges};
use crate::service::{PdfService, SplitResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SplitType {
    /// One file per page
    All,
    /// One file per page between a start and end page
    Range,
    /// One file per page named in a page list like "1-3,5"
    Specific,
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SplitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::All => "all",
            SplitType::Range => "range",
            SplitType::Specific => "specific",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    All,
    Range { start: u32, end: u32 },
    Specific(String),
}

impl SplitMode {
    /// Build a mode from loosely filled form inputs, checking that the
    /// inputs the chosen type needs are present.
    pub fn from_inputs(
        split_type: SplitType,
        start: Option<u32>,
        end: Option<u32>,
        pages: Option<&str>,
    ) -> Result<Self> {
        match split_type {
            SplitType::All => Ok(SplitMode::All),
            SplitType::Range => match (start, end) {
                (Some(start), Some(end)) => {
                    if start == 0 {
                        return Err(Error::invalid("Page numbers must be >= 1"));
                    }
                    if start > end {
                        return Err(Error::invalid(format!(
                            "Start page {} is after end page {}",
                            start, end
                        )));
                    }
                    Ok(SplitMode::Range { start, end })
                }
                _ => Err(Error::invalid("Enter both a start page and an end page")),
            },
            SplitType::Specific => {
                let pages = pages.map(str::trim).unwrap_or_default();
                if pages.is_empty() {
                    return Err(Error::invalid("Enter the page numbers to split out"));
                }
                parse_page_ranges(pages)?;
                Ok(SplitMode::Specific(pages.to_string()))
            }
        }
    }

    pub fn split_type(&self) -> SplitType {
        match self {
            SplitMode::All => SplitType::All,
            SplitMode::Range { .. } => SplitType::Range,
            SplitMode::Specific(_) => SplitType::Specific,
        }
    }

    /// Form fields sent alongside the file.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("split_type", self.split_type().as_str().to_string())];
        match self {
            SplitMode::All => {}
            SplitMode::Range { start, end } => {
                fields.push(("start_page", start.to_string()));
                fields.push(("end_page", end.to_string()));
            }
            SplitMode::Specific(pages) => fields.push(("specific_pages", pages.clone())),
        }
        fields
    }

    /// Pages the service should produce for a document of `total_pages`.
    pub fn pages(&self, total_pages: u32) -> Result<Vec<u32>> {
        match self {
            SplitMode::All => Ok((1..=total_pages).collect()),
            SplitMode::Range { start, end } => {
                expand_page_set(&format!("{}-{}", start, end), total_pages)
            }
            SplitMode::Specific(pages) => expand_page_set(pages, total_pages),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub document: PdfDocument,
    pub mode: SplitMode,
}

impl SplitRequest {
    /// Ask the service for the page count and check the mode against it.
    /// Returns the pages a split would produce.
    pub async fn check(&self, service: &dyn PdfService) -> Result<Vec<u32>> {
        let total_pages = service.page_info(&self.document).await?;
        let pages = self.mode.pages(total_pages)?;
        if pages.is_empty() {
            return Err(Error::invalid("No valid pages specified"));
        }
        debug!(?pages, total_pages, "pages to split");
        Ok(pages)
    }

    /// Check the request, then send it.
    pub async fn submit(&self, service: &dyn PdfService) -> Result<SplitResult> {
        self.check(service).await?;
        service.split(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_requires_both_ends() {
        assert!(SplitMode::from_inputs(SplitType::Range, Some(1), None, None).is_err());
        assert!(SplitMode::from_inputs(SplitType::Range, Some(4), Some(2), None).is_err());
        assert_eq!(
            SplitMode::from_inputs(SplitType::Range, Some(2), Some(4), None).unwrap(),
            SplitMode::Range { start: 2, end: 4 }
        );
    }

    #[test]
    fn test_specific_requires_valid_spec() {
        assert!(SplitMode::from_inputs(SplitType::Specific, None, None, Some("  ")).is_err());
        assert!(SplitMode::from_inputs(SplitType::Specific, None, None, Some("1,x")).is_err());
        let mode =
            SplitMode::from_inputs(SplitType::Specific, None, None, Some(" 1-3,5 ")).unwrap();
        assert_eq!(mode, SplitMode::Specific("1-3,5".to_string()));
    }

    #[test]
    fn test_form_fields() {
        let mode = SplitMode::Range { start: 2, end: 3 };
        assert_eq!(
            mode.form_fields(),
            vec![
                ("split_type", "range".to_string()),
                ("start_page", "2".to_string()),
                ("end_page", "3".to_string()),
            ]
        );
        assert_eq!(
            SplitMode::All.form_fields(),
            vec![("split_type", "all".to_string())]
        );
    }

    #[test]
    fn test_pages_use_one_grammar() {
        // "1-3" and "1,2,3" mean the same thing regardless of mode
        let range = SplitMode::Range { start: 1, end: 3 };
        let specific = SplitMode::Specific("1,2,3".to_string());
        assert_eq!(range.pages(10).unwrap(), specific.pages(10).unwrap());
        assert_eq!(
            SplitMode::Specific("5-7,1-2".into()).pages(10).unwrap(),
            vec![1, 2, 5, 6, 7]
        );
        assert_eq!(SplitMode::All.pages(3).unwrap(), vec![1, 2, 3]);
    }
}
