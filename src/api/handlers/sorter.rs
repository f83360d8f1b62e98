use crate::AppState;
use crate::api::error::AppError;
use crate::config::SortVariant;
use crate::models::{ProcessOutcome, SortedReport};
use crate::services::staging::StagingError;
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::Html,
};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use serde::Serialize;
use tokio_util::io::StreamReader;
use utoipa::ToSchema;

/// Multipart field carrying the uploaded folder's files
pub const FOLDER_FIELD: &str = "folder";

pub const CLEARED_MESSAGE: &str = "Folders cleared successfully!";

const INDEX_HTML: &str = include_str!("../../../templates/index.html");

#[derive(Serialize, ToSchema)]
pub struct UploadReportResponse {
    pub variant: SortVariant,
    /// Destination paths keyed by category (and academic year)
    #[schema(value_type = Object)]
    pub sorted_files: SortedReport,
    /// Staged files that could not be moved into the output tree
    pub failed: Vec<String>,
    pub processed_at: DateTime<Utc>,
}

impl UploadReportResponse {
    fn new(variant: SortVariant, outcome: ProcessOutcome) -> Self {
        Self {
            variant,
            sorted_files: outcome.sorted_files,
            failed: outcome
                .failed
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            processed_at: Utc::now(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Folder upload form", body = String, content_type = "text/html")
    ),
    tag = "sorter"
)]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[utoipa::path(
    post,
    path = "/upload-folder",
    request_body(content = Multipart, description = "Files of the uploaded folder, field name `folder`"),
    responses(
        (status = 200, description = "Files sorted", body = UploadReportResponse),
        (status = 400, description = "No folder uploaded!", body = String, content_type = "text/plain"),
        (status = 413, description = "Request body exceeds the maximum allowed limit", body = String, content_type = "text/plain"),
        (status = 500, description = "Error occurred during folder upload.", body = String, content_type = "text/plain")
    ),
    tag = "sorter"
)]
pub async fn upload_folder(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadReportResponse>, AppError> {
    tracing::debug!("Received request to upload folder");

    // A form posted without any file part carries no multipart body at all
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!("Upload request without multipart body: {}", rejection);
        AppError::NoFolderUploaded
    })?;

    let result: Result<Json<UploadReportResponse>, AppError> = async {
        state
            .sorter
            .lifecycle()
            .ensure_upload_area()
            .map_err(|e| AppError::Upload(e.into()))?;

        let mut staged = 0usize;
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(FOLDER_FIELD) {
                continue;
            }

            // An empty folder picker still submits one nameless part
            let original_name = match field.file_name() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => continue,
            };

            let body_with_io_error = field.map_err(std::io::Error::other);
            let reader = StreamReader::new(body_with_io_error);

            match state.sorter.stage(&original_name, reader).await {
                Ok(_) => staged += 1,
                Err(e @ StagingError::InvalidName { .. }) => {
                    tracing::warn!("Skipping upload: {}", e);
                }
                Err(StagingError::Write { source, .. })
                    if source
                        .get_ref()
                        .and_then(|inner| inner.downcast_ref::<MultipartError>())
                        .is_some_and(|e| e.status() == StatusCode::PAYLOAD_TOO_LARGE) =>
                {
                    return Err(payload_too_large());
                }
                Err(e) => return Err(AppError::Upload(e.into())),
            }
        }

        if staged == 0 {
            return Err(AppError::NoFolderUploaded);
        }

        let outcome = state.sorter.sort_staged().await?;
        Ok(Json(UploadReportResponse::new(
            state.sorter.config().variant,
            outcome,
        )))
    }
    .await;

    match result {
        Ok(res) => Ok(res),
        Err(e) => {
            // Drain the rest of the body so the browser sees our message rather than a reset
            while let Ok(Some(mut field)) = multipart.next_field().await {
                while let Ok(Some(_)) = field.chunk().await {}
            }
            Err(e)
        }
    }
}

fn payload_too_large() -> AppError {
    AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        payload_too_large()
    } else {
        AppError::BadRequest(e.body_text())
    }
}

#[utoipa::path(
    post,
    path = "/clear-folders",
    responses(
        (status = 200, description = "Folders cleared successfully!", body = String, content_type = "text/plain"),
        (status = 500, description = "Error clearing folders.", body = String, content_type = "text/plain")
    ),
    tag = "sorter"
)]
pub async fn clear_folders(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.sorter.clear().map_err(AppError::Clear)?;
    Ok(CLEARED_MESSAGE)
}
