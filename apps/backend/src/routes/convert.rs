//! Document conversion endpoint

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart},
    Json,
};
use quiz_core::{parse_docx, ConvertResponse};

use crate::error::{ApiError, Result};

/// Multipart part that carries the document.
pub const FILE_FIELD: &str = "docx";

/// Uploaded document held in memory for one request.
#[derive(Debug)]
struct Upload {
    file_name: String,
    bytes: Bytes,
}

/// POST /convert
/// Convert an uploaded DOCX into quiz lists
pub async fn convert(
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ConvertResponse>> {
    // A body that is not multipart carries no file either.
    let Ok(mut multipart) = multipart else {
        return Err(ApiError::MissingFile);
    };
    let upload = read_upload(&mut multipart).await?.ok_or(ApiError::MissingFile)?;

    tracing::info!(
        file_name = %upload.file_name,
        bytes = upload.bytes.len(),
        "Converting uploaded document"
    );

    let listas = tokio::task::spawn_blocking(move || parse_docx(&upload.bytes))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    tracing::info!(lists = listas.len(), "Conversion finished");

    Ok(Json(ConvertResponse::from(listas)))
}

/// Take the first part that carries a file name, normally the `docx` part.
/// Text fields are skipped even when they are named `docx`.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>> {
    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            tracing::debug!("Skipping multipart field {:?}", field.name());
            continue;
        };
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!("Taking file from multipart field {:?}", field.name());
        }

        let bytes = field.bytes().await?;
        return Ok(Some(Upload { file_name, bytes }));
    }
    Ok(None)
}
