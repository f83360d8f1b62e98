use crate::config::CollisionPolicy;
use crate::services::category::Category;
use crate::services::year::YearBucket;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("Source file {0} does not exist")]
    MissingSource(String),

    #[error("Source path {0} has no file name")]
    NoFileName(String),

    #[error("Failed to create directory {path}: {source}")]
    CreateDir { path: String, source: io::Error },

    #[error("Destination {0} already exists")]
    Collision(String),

    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: String,
        to: String,
        source: io::Error,
    },
}

/// Moves classified files into `<output>/<category>[/<year>]`
#[derive(Debug, Clone)]
pub struct FilePlacer {
    output_root: PathBuf,
    policy: CollisionPolicy,
}

impl FilePlacer {
    pub fn new(output_root: impl Into<PathBuf>, policy: CollisionPolicy) -> Self {
        Self {
            output_root: output_root.into(),
            policy,
        }
    }

    /// Directory a file of this category (and year, if sorting by year) lands in
    pub fn destination_dir(&self, category: Category, year: Option<YearBucket>) -> PathBuf {
        let dir = self.output_root.join(category.as_str());
        match year {
            Some(year) => dir.join(year.as_str()),
            None => dir,
        }
    }

    /// Moves `source` into its destination directory under its original name.
    ///
    /// Failures are logged here and reported as `None`; the caller only needs
    /// to decide whether the file made it into the report.
    pub fn place(
        &self,
        source: &Path,
        category: Category,
        year: Option<YearBucket>,
    ) -> Option<PathBuf> {
        match self.try_place(source, category, year) {
            Ok(dest) => {
                tracing::info!("File {} moved to {}", source.display(), dest.display());
                Some(dest)
            }
            Err(e) => {
                tracing::error!("Error saving file {}: {}", source.display(), e);
                None
            }
        }
    }

    pub fn try_place(
        &self,
        source: &Path,
        category: Category,
        year: Option<YearBucket>,
    ) -> Result<PathBuf, PlacementError> {
        if !source.is_file() {
            return Err(PlacementError::MissingSource(source.display().to_string()));
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| PlacementError::NoFileName(source.display().to_string()))?;

        let dest_dir = self.destination_dir(category, year);
        fs::create_dir_all(&dest_dir).map_err(|e| PlacementError::CreateDir {
            path: dest_dir.display().to_string(),
            source: e,
        })?;

        let mut dest = dest_dir.join(file_name);
        if dest.exists() {
            match self.policy {
                CollisionPolicy::Overwrite => {
                    tracing::warn!("Overwriting existing file {}", dest.display());
                }
                CollisionPolicy::Rename => {
                    dest = free_name(&dest_dir, Path::new(file_name));
                    tracing::debug!("Destination taken, renaming to {}", dest.display());
                }
                CollisionPolicy::Reject => {
                    return Err(PlacementError::Collision(dest.display().to_string()));
                }
            }
        }

        move_file(source, &dest).map_err(|e| PlacementError::Move {
            from: source.display().to_string(),
            to: dest.display().to_string(),
            source: e,
        })?;

        Ok(dest)
    }
}

/// First `stem (n).ext` in `dir` that does not exist yet
fn free_name(dir: &Path, file_name: &Path) -> PathBuf {
    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = file_name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, n, ext));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// `rename`, falling back to copy + remove when source and destination sit
/// on different filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!(
                "Cross-device move of {}, copying instead",
                from.display()
            );
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}
