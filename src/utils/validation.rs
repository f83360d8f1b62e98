use std::path::Path;
use thiserror::Error;

/// Longest file name we are willing to write, in bytes
pub const MAX_FILENAME_LEN: usize = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("INVALID_FILENAME: Filename cannot be empty")]
    EmptyFilename,

    #[error("HIDDEN_FILE: Hidden files (starting with '.') are not allowed")]
    HiddenFile,
}

/// Reduces a client-supplied upload name to a safe base file name.
///
/// Folder uploads arrive as `folder/sub/file.pdf`; only the last component is
/// kept, so the staging area stays flat.
pub fn sanitize_filename(filename: &str) -> Result<String, ValidationError> {
    // Browsers on Windows may send backslash-separated relative paths
    let normalized = filename.replace('\\', "/");
    let name = Path::new(&normalized)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.contains("..") {
        tracing::warn!("Path traversal attempt detected: {}", filename);
    }

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || c == ':'
                || c == '*'
                || c == '?'
                || c == '"'
                || c == '<'
                || c == '>'
                || c == '|'
                || c == ';'
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Limit length safely for UTF-8
    let sanitized = if sanitized.len() > MAX_FILENAME_LEN {
        let mut end = MAX_FILENAME_LEN;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    if sanitized.starts_with('.') {
        return Err(ValidationError::HiddenFile);
    }

    Ok(sanitized)
}
