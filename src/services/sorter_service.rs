use crate::config::SorterConfig;
use crate::models::ProcessOutcome;
use crate::services::lifecycle::FolderLifecycle;
use crate::services::placer::FilePlacer;
use crate::services::processor::FolderProcessor;
use crate::services::semester::{PageTextSource, SemesterExtractor};
use crate::services::staging::{self, StagingError};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncRead;

/// Ties staging, sorting and folder housekeeping together for the HTTP layer
pub struct SorterService {
    lifecycle: FolderLifecycle,
    processor: FolderProcessor,
    config: SorterConfig,
}

impl SorterService {
    pub fn new(config: SorterConfig, text_source: Arc<dyn PageTextSource>) -> Self {
        let lifecycle = FolderLifecycle::new(&config.upload_dir, &config.output_dir);
        let processor = FolderProcessor::new(
            config.variant,
            FilePlacer::new(&config.output_dir, config.collision_policy),
            SemesterExtractor::new(text_source),
        );

        Self {
            lifecycle,
            processor,
            config,
        }
    }

    pub fn config(&self) -> &SorterConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &FolderLifecycle {
        &self.lifecycle
    }

    pub async fn stage<'a>(
        &self,
        original_name: &str,
        reader: impl AsyncRead + Unpin + Send + 'a,
    ) -> Result<PathBuf, StagingError> {
        staging::stage_file(self.lifecycle.upload_dir(), original_name, reader).await
    }

    /// Creates the output tree and sorts everything currently staged.
    ///
    /// Sorting is blocking filesystem and PDF work, so it runs on the
    /// blocking pool; the request still waits for the whole batch.
    pub async fn sort_staged(&self) -> Result<ProcessOutcome> {
        self.lifecycle
            .prepare_output_tree(self.config.variant)
            .context("Error creating output folders")?;

        let processor = self.processor.clone();
        let upload_dir = self.lifecycle.upload_dir().to_path_buf();
        let outcome = tokio::task::spawn_blocking(move || processor.process(&upload_dir))
            .await
            .context("Sorting task panicked")?;

        Ok(outcome)
    }

    /// Wipes and recreates both working directories
    pub fn clear(&self) -> std::io::Result<()> {
        self.lifecycle.reset_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortVariant;
    use crate::services::category::Category;
    use crate::services::semester::NoTextSource;

    #[tokio::test]
    async fn test_stage_then_sort() {
        let root = tempfile::tempdir().unwrap();
        let config = SorterConfig::development(root.path()).with_variant(SortVariant::Simple);
        let service = SorterService::new(config, Arc::new(NoTextSource));
        service.lifecycle().reset_all().unwrap();

        service.stage("batch/cw_a.pdf", &b"a"[..]).await.unwrap();
        service.stage("batch/readme.pdf", &b"b"[..]).await.unwrap();

        let outcome = service.sort_staged().await.unwrap();
        let out = root.path().join("output");

        assert_eq!(
            outcome.sorted_files.files(Category::Cw, None),
            [out.join("CW/cw_a.pdf")]
        );
        assert_eq!(
            outcome.sorted_files.files(Category::Uncategorized, None),
            [out.join("Uncategorized/readme.pdf")]
        );
        assert!(out.join("SW").is_dir());
    }

    #[tokio::test]
    async fn test_clear() {
        let root = tempfile::tempdir().unwrap();
        let service = SorterService::new(
            SorterConfig::development(root.path()),
            Arc::new(NoTextSource),
        );
        service.lifecycle().reset_all().unwrap();
        service.stage("x.pdf", &b"x"[..]).await.unwrap();

        service.clear().unwrap();

        assert!(!root.path().join("uploads/x.pdf").exists());
        assert!(root.path().join("output").is_dir());
    }
}
