//! Multipart image upload endpoint.

use std::path::Path;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::application::error::FeedError;
use crate::application::source::ImageStore;
use crate::domain::posts::ImageFile;

use super::client::{HttpContext, transport_error};

const UPLOAD_PATH: &str = "upload-image";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct HttpImageStore {
    ctx: HttpContext,
}

impl HttpImageStore {
    pub fn new(ctx: HttpContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload_image(
        &self,
        image: Option<&ImageFile>,
        old_image: Option<&str>,
    ) -> Result<String, FeedError> {
        let url = self.ctx.url(UPLOAD_PATH)?;
        let mut form = Form::new();
        if let Some(file) = image {
            let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
            if let Some(content_type) = file.content_type.as_deref() {
                part = part.mime_str(content_type).map_err(|e| {
                    FeedError::invalid_input(format!("invalid content type `{content_type}`: {e}"))
                })?;
            }
            form = form.part("image", part);
        }
        if let Some(old) = old_image {
            form = form.text("oldImage", old.to_string());
        }

        debug!(
            has_image = image.is_some(),
            replaces = old_image.unwrap_or_default(),
            "Uploading image"
        );
        let resp = self
            .ctx
            .client()
            .put(url)
            .header(AUTHORIZATION, self.ctx.auth_header()?)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(FeedError::Validation(
                "no image uploaded or attached file is not an image (jpeg/jpg/png)".into(),
            ));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(FeedError::Mutation(format!(
                "image upload failed: status {status} body {text}"
            )));
        }

        let body: UploadResponse = resp.json().await.map_err(transport_error)?;
        body.file_path.ok_or_else(|| {
            FeedError::protocol(format!(
                "upload response is missing `filePath`{}",
                body.message
                    .map(|message| format!(" ({message})"))
                    .unwrap_or_default()
            ))
        })
    }
}

/// Read an image from disk for upload, guessing its MIME type from the name.
pub async fn read_image(path: &Path) -> Result<ImageFile, FeedError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        FeedError::invalid_input(format!("failed to read image {}: {e}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    let content_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string());

    Ok(ImageFile {
        file_name,
        content_type,
        bytes,
    })
}
