use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pub start: PageRef,
    pub end: Option<PageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRef {
    Number(u32),
    End,
}

impl PageRange {
    /// Parse a single item like "5", "1-5", "9-6" or "3-end"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::invalid("Empty page range"));
        }

        if let Some(dash_pos) = s.find('-') {
            // "-5" is not a range
            if dash_pos == 0 {
                return Err(Error::invalid(format!("Invalid page range: {}", s)));
            }

            let start = parse_page_ref(&s[..dash_pos])?;
            let end = parse_page_ref(&s[dash_pos + 1..])?;

            Ok(PageRange {
                start,
                end: Some(end),
            })
        } else {
            Ok(PageRange {
                start: parse_page_ref(s)?,
                end: None,
            })
        }
    }

    /// Expand this range into a list of 1-based page numbers
    pub fn expand(&self, total_pages: u32) -> Result<Vec<u32>> {
        let start = match &self.start {
            PageRef::Number(n) => *n,
            PageRef::End => total_pages,
        };

        let end = match &self.end {
            Some(PageRef::Number(n)) => *n,
            Some(PageRef::End) => total_pages,
            None => start,
        };

        if start == 0 || end == 0 {
            return Err(Error::invalid("Page numbers must be >= 1"));
        }

        if start > total_pages {
            return Err(Error::invalid(format!(
                "Start page {} exceeds total pages {}",
                start, total_pages
            )));
        }

        if end > total_pages {
            return Err(Error::invalid(format!(
                "End page {} exceeds total pages {}",
                end, total_pages
            )));
        }

        let pages: Vec<u32> = if start <= end {
            (start..=end).collect()
        } else {
            (end..=start).rev().collect()
        };

        Ok(pages)
    }
}

fn parse_page_ref(s: &str) -> Result<PageRef> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("end") {
        Ok(PageRef::End)
    } else {
        s.parse::<u32>()
            .map(PageRef::Number)
            .map_err(|_| Error::invalid(format!("Invalid page number: {}", s)))
    }
}

/// Parse a comma-separated list of page ranges like "1-5,10,15-end"
pub fn parse_page_ranges(s: &str) -> Result<Vec<PageRange>> {
    s.split(',').map(PageRange::parse).collect()
}

/// Expand a page range string into a list of 1-based page numbers, in the
/// order written
pub fn expand_page_ranges(s: &str, total_pages: u32) -> Result<Vec<u32>> {
    let ranges = parse_page_ranges(s)?;
    let mut pages = Vec::new();
    for range in ranges {
        pages.extend(range.expand(total_pages)?);
    }
    Ok(pages)
}

/// Expand a page range string into a sorted, duplicate-free page set
pub fn expand_page_set(s: &str, total_pages: u32) -> Result<Vec<u32>> {
    let mut pages = expand_page_ranges(s, total_pages)?;
    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

/// Parse a one-based page list like "3,1,2" without range expansion
pub fn parse_page_list(s: &str) -> Result<Vec<u32>> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u32>()
                .map_err(|_| Error::invalid(format!("Invalid page number: {}", part)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        let range = PageRange::parse("5").unwrap();
        assert_eq!(range.start, PageRef::Number(5));
        assert_eq!(range.end, None);
        assert_eq!(range.expand(10).unwrap(), vec![5]);
    }

    #[test]
    fn test_page_range() {
        let range = PageRange::parse(" 1 - 5 ").unwrap();
        assert_eq!(range.expand(10).unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reverse_range() {
        let range = PageRange::parse("5-1").unwrap();
        assert_eq!(range.expand(10).unwrap(), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_end_keyword() {
        assert_eq!(expand_page_ranges("5-end", 7).unwrap(), vec![5, 6, 7]);
        assert_eq!(expand_page_ranges("END", 7).unwrap(), vec![7]);
    }

    #[test]
    fn test_mixed_ranges_and_singles() {
        assert_eq!(expand_page_ranges("1-3,5", 10).unwrap(), vec![1, 2, 3, 5]);
        assert_eq!(
            expand_page_ranges("1-3,5-7", 10).unwrap(),
            vec![1, 2, 3, 5, 6, 7]
        );
    }

    #[test]
    fn test_page_set_sorts_and_dedups() {
        assert_eq!(expand_page_set("5,1-3,2", 10).unwrap(), vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_invalid_page_zero() {
        assert!(expand_page_ranges("0", 10).is_err());
    }

    #[test]
    fn test_page_exceeds_total() {
        assert!(expand_page_ranges("11", 10).is_err());
        assert!(expand_page_ranges("8-12", 10).is_err());
    }

    #[test]
    fn test_malformed_items() {
        assert!(parse_page_ranges("1,,2").is_err());
        assert!(parse_page_ranges("-5").is_err());
        assert!(parse_page_ranges("a-b").is_err());
        assert!(parse_page_ranges("").is_err());
    }

    #[test]
    fn test_page_list() {
        assert_eq!(parse_page_list("3, 1,2").unwrap(), vec![3, 1, 2]);
        assert!(parse_page_list("1-2").is_err());
    }
}
