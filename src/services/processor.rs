use crate::config::SortVariant;
use crate::models::{ProcessOutcome, SortedReport};
use crate::services::category::Category;
use crate::services::placer::FilePlacer;
use crate::services::semester::SemesterExtractor;
use crate::services::year::YearBucket;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Sorts every file under a staging directory into the output tree
#[derive(Clone)]
pub struct FolderProcessor {
    variant: SortVariant,
    placer: FilePlacer,
    extractor: SemesterExtractor,
}

impl FolderProcessor {
    pub fn new(variant: SortVariant, placer: FilePlacer, extractor: SemesterExtractor) -> Self {
        Self {
            variant,
            placer,
            extractor,
        }
    }

    /// Walks `root` recursively and places each regular file.
    ///
    /// Entries are visited sorted by name. Files that cannot be placed stay
    /// where they are and are listed in `failed`.
    pub fn process(&self, root: &Path) -> ProcessOutcome {
        let mut report = SortedReport::empty(self.variant);
        let mut failed = Vec::new();

        for file_path in collect_files(root) {
            match self.process_file(&file_path) {
                Some((category, year, dest)) => report.record(category, year, dest),
                None => {
                    tracing::error!("Failed to process file {}", file_path.display());
                    failed.push(file_path);
                }
            }
        }

        tracing::info!(
            "Sorted {} file(s) from {}, {} failed",
            report.total(),
            root.display(),
            failed.len()
        );

        ProcessOutcome {
            sorted_files: report,
            failed,
        }
    }

    fn process_file(&self, file_path: &Path) -> Option<(Category, Option<YearBucket>, PathBuf)> {
        let filename = file_path.file_name()?.to_string_lossy();
        let category = Category::classify(&filename, self.variant);
        tracing::debug!("Category determined: {} for file: {}", category, filename);

        match self.variant {
            SortVariant::Simple => {
                let dest = self.placer.place(file_path, category, None)?;
                Some((category, None, dest))
            }
            SortVariant::Semester => {
                let semester = self.extractor.extract(file_path);
                let year = YearBucket::from_semester(semester);
                tracing::debug!("Semester: {:?}, Year: {:?}", semester, year);

                let folder = year.unwrap_or(YearBucket::Uncategorized);
                let dest = self.placer.place(file_path, category, Some(folder))?;

                // The report reflects what the placed file says about itself
                let year = YearBucket::from_semester(self.extractor.extract(&dest));
                if year.is_none() {
                    tracing::error!("Failed to determine year for file {}", file_path.display());
                }
                Some((category, year, dest))
            }
        }
    }
}

fn collect_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
