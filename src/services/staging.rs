use crate::utils::validation::{ValidationError, sanitize_filename};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWriteExt};

#[derive(Error, Debug)]
pub enum StagingError {
    #[error("Invalid filename '{name}': {source}")]
    InvalidName {
        name: String,
        source: ValidationError,
    },

    #[error("Failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
}

/// Writes one uploaded file into the flat staging directory.
///
/// The stored name is the sanitized base name of `original_name`; a file of
/// the same name staged earlier in the request is replaced.
pub async fn stage_file<R>(
    upload_dir: &Path,
    original_name: &str,
    mut reader: R,
) -> Result<PathBuf, StagingError>
where
    R: AsyncRead + Unpin,
{
    let filename = sanitize_filename(original_name).map_err(|e| StagingError::InvalidName {
        name: original_name.to_string(),
        source: e,
    })?;
    let path = upload_dir.join(&filename);

    let write_err = |e: io::Error| StagingError::Write {
        path: path.display().to_string(),
        source: e,
    };

    let mut file = tokio::fs::File::create(&path).await.map_err(write_err)?;
    let written = tokio::io::copy(&mut reader, &mut file)
        .await
        .map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    tracing::debug!(
        "Uploaded file saved at: {} ({} bytes)",
        path.display(),
        written
    );
    Ok(path)
}
