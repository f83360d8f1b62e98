use crate::config::SortVariant;
use crate::services::category::Category;
use crate::services::year::YearBucket;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Owns the staging and output directory trees
#[derive(Debug, Clone)]
pub struct FolderLifecycle {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

impl FolderLifecycle {
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Deletes the staging tree (if present) and recreates it empty
    pub fn reset_upload_area(&self) -> io::Result<()> {
        reset_dir(&self.upload_dir)?;
        tracing::info!("Upload folder cleared.");
        Ok(())
    }

    /// Deletes the output tree (if present) and recreates it empty
    pub fn reset_output_area(&self) -> io::Result<()> {
        reset_dir(&self.output_dir)?;
        tracing::info!("Output folder cleared.");
        Ok(())
    }

    pub fn reset_all(&self) -> io::Result<()> {
        self.reset_upload_area()?;
        self.reset_output_area()
    }

    /// Creates the staging directory without touching its contents
    pub fn ensure_upload_area(&self) -> io::Result<()> {
        fs::create_dir_all(&self.upload_dir)
    }

    /// Pre-creates the category tree a batch sorts into, so every bucket is
    /// visible even when empty
    pub fn prepare_output_tree(&self, variant: SortVariant) -> io::Result<()> {
        for category in Category::for_variant(variant) {
            let category_dir = self.output_dir.join(category.as_str());
            match variant {
                SortVariant::Semester => {
                    for year in YearBucket::YEARS {
                        fs::create_dir_all(category_dir.join(year.as_str()))?;
                    }
                }
                SortVariant::Simple => fs::create_dir_all(&category_dir)?,
            }
        }
        tracing::info!("Output folders created successfully.");
        Ok(())
    }
}

fn reset_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(dir)
}
