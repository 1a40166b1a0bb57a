use std::path::Path;

use crate::config::Config;
use crate::document::PdfDocument;
use crate::error::{Error, Result};

/// Ordered list of files to be combined by the service.
#[derive(Debug, Default, Clone)]
pub struct MergeRequest {
    files: Vec<PdfDocument>,
}

impl MergeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<P: AsRef<Path>>(paths: &[P], config: &Config) -> Result<Self> {
        let mut request = Self::new();
        for path in paths {
            request.add(PdfDocument::open(path, config.max_file_size)?);
        }
        Ok(request)
    }

    pub fn add(&mut self, document: PdfDocument) {
        self.files.push(document);
    }

    pub fn remove(&mut self, index: usize) -> Result<PdfDocument> {
        if index >= self.files.len() {
            return Err(Error::invalid("File index out of bounds"));
        }
        Ok(self.files.remove(index))
    }

    /// Rearrange files; `new_order` lists current indices in the desired
    /// order.
    pub fn reorder(&mut self, new_order: &[usize]) -> Result<()> {
        if new_order.len() != self.files.len() {
            return Err(Error::invalid("Invalid order: wrong number of indices"));
        }

        let mut seen = vec![false; self.files.len()];
        for &idx in new_order {
            if idx >= self.files.len() {
                return Err(Error::invalid("Invalid order: index out of bounds"));
            }
            if seen[idx] {
                return Err(Error::invalid("Invalid order: duplicate index"));
            }
            seen[idx] = true;
        }

        self.files = new_order.iter().map(|&idx| self.files[idx].clone()).collect();
        Ok(())
    }

    pub fn files(&self) -> &[PdfDocument] {
        &self.files
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn validate(&self, config: &Config) -> Result<()> {
        if self.files.len() < 2 {
            return Err(Error::invalid(format!(
                "Select at least 2 files to merge (currently {})",
                self.files.len()
            )));
        }
        if self.files.len() > config.max_files_per_request {
            return Err(Error::invalid(format!(
                "At most {} files can be merged at once",
                config.max_files_per_request
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc(name: &str) -> PdfDocument {
        PdfDocument {
            path: PathBuf::from(name),
            name: name.to_string(),
            size: 10,
        }
    }

    fn request(names: &[&str]) -> MergeRequest {
        let mut request = MergeRequest::new();
        for name in names {
            request.add(doc(name));
        }
        request
    }

    #[test]
    fn test_needs_two_files() {
        let config = Config::default();
        assert!(request(&["a.pdf"]).validate(&config).is_err());
        assert!(request(&["a.pdf", "b.pdf"]).validate(&config).is_ok());
    }

    #[test]
    fn test_file_limit() {
        let config = Config::default();
        let names: Vec<String> = (0..11).map(|i| format!("{}.pdf", i)).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let err = request(&refs).validate(&config).unwrap_err();
        assert!(err.is_local());
        assert!(request(&refs[..10]).validate(&config).is_ok());
    }

    #[test]
    fn test_reorder() {
        let mut request = request(&["a.pdf", "b.pdf", "c.pdf"]);
        request.reorder(&[2, 0, 1]).unwrap();
        let names: Vec<_> = request.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["c.pdf", "a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_reorder_rejects_bad_indices() {
        let mut request = request(&["a.pdf", "b.pdf"]);
        assert!(request.reorder(&[0]).is_err());
        assert!(request.reorder(&[0, 0]).is_err());
        assert!(request.reorder(&[0, 2]).is_err());
    }

    #[test]
    fn test_remove() {
        let mut request = request(&["a.pdf", "b.pdf"]);
        assert_eq!(request.remove(0).unwrap().name, "a.pdf");
        assert!(request.remove(3).is_err());
        assert_eq!(request.total_size(), 10);
    }
}
