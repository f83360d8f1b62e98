use crate::config::{SortVariant, SorterConfig};
use crate::services::semester::{LopdfTextSource, NoTextSource, PageTextSource};
use crate::services::sorter_service::SorterService;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Builds the sorter and starts it from clean working directories
pub fn setup_storage(config: &SorterConfig) -> Result<Arc<SorterService>> {
    info!(
        "📂 Working folders: uploads={} output={}",
        config.upload_dir.display(),
        config.output_dir.display()
    );

    // The simple variant never looks inside documents
    let text_source: Arc<dyn PageTextSource> = match config.variant {
        SortVariant::Semester => Arc::new(LopdfTextSource),
        SortVariant::Simple => Arc::new(NoTextSource),
    };

    let sorter = SorterService::new(config.clone(), text_source);
    sorter
        .lifecycle()
        .reset_all()
        .context("Failed to reset working folders")?;

    Ok(Arc::new(sorter))
}
