use regex::Regex;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

static SEMESTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Semester\s*[:\s]*([1-8])").expect("valid semester pattern"));

const SEMESTER_TOKEN: &str = "Semester";

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to open document {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("Document {path} has no extractable text")]
    Empty { path: String },
}

/// Yields the text of every page of a document, in page order
pub trait PageTextSource: Send + Sync {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, ExtractionError>;
}

/// PDF text extraction backed by lopdf
pub struct LopdfTextSource;

impl PageTextSource for LopdfTextSource {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let doc = lopdf::Document::load(path).map_err(|e| ExtractionError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    // One unreadable page must not hide a marker on the next one
                    tracing::warn!(
                        "Could not extract text from page {} of {}: {}",
                        page_num,
                        path.display(),
                        e
                    );
                    texts.push(String::new());
                }
            }
        }

        if texts.iter().all(|t| t.trim().is_empty()) {
            return Err(ExtractionError::Empty {
                path: path.display().to_string(),
            });
        }

        Ok(texts)
    }
}

/// Source that never yields text; every document resolves to "no semester"
pub struct NoTextSource;

impl PageTextSource for NoTextSource {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        Err(ExtractionError::Empty {
            path: path.display().to_string(),
        })
    }
}

/// Scans page texts for the first `Semester` line carrying a digit 1-8.
///
/// A line that mentions "Semester" without a usable digit does not end the
/// search; scanning continues with the following lines and pages.
pub fn find_semester<I, S>(pages: I) -> Option<u8>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for page in pages {
        for line in page.as_ref().lines() {
            if !line.contains(SEMESTER_TOKEN) {
                continue;
            }
            tracing::debug!("Checking line: {}", line);
            if let Some(digit) = SEMESTER_PATTERN
                .captures(line)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u8>().ok())
            {
                tracing::debug!("Found semester: {}", digit);
                return Some(digit);
            }
        }
    }
    None
}

#[derive(Clone)]
pub struct SemesterExtractor {
    source: Arc<dyn PageTextSource>,
}

impl SemesterExtractor {
    pub fn new(source: Arc<dyn PageTextSource>) -> Self {
        Self { source }
    }

    pub fn lopdf() -> Self {
        Self::new(Arc::new(LopdfTextSource))
    }

    /// Semester number of the document at `path`, if one can be found.
    /// Unreadable documents are logged and reported as absent.
    pub fn extract(&self, path: &Path) -> Option<u8> {
        tracing::debug!("Extracting semester from: {}", path.display());

        let pages = match self.source.page_texts(path) {
            Ok(pages) => pages,
            Err(e @ ExtractionError::Empty { .. }) => {
                tracing::debug!("{}", e);
                return None;
            }
            Err(e) => {
                tracing::error!("Error reading PDF {}: {}", path.display(), e);
                return None;
            }
        };

        let semester = find_semester(&pages);
        if semester.is_none() {
            tracing::debug!("No semester marker in {}", path.display());
        }
        semester
    }
}
