use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::asr;
use crate::error::ApiError;
use crate::state::AppState;
use crate::translate::languages::{Language, LANGUAGE_CODES};
use crate::translate::TranslationResult;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/languages", get(list_languages))
        .route("/upload_file", post(upload_file))
        .route("/file_translate", post(file_translate))
        .route("/translate", post(translate_text))
        .route("/voice_translate", post(voice_translate))
        .layer(DefaultBodyLimit::max(body_limit))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_languages() -> Json<&'static [Language]> {
    Json(LANGUAGE_CODES)
}

/// A blank language selector means "use the default target".
fn selected_lang(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|lang| !lang.is_empty())
}

/// The `file` part of a multipart request.
struct UploadedFile {
    filename: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    target_lang: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    form.file = Some(UploadedFile { filename, bytes });
                }
                Some("target_lang") => {
                    let value = field.text().await?;
                    form.target_lang = selected_lang(Some(value.as_str())).map(str::to_string);
                }
                _ => {}
            }
        }
        Ok(form)
    }

    /// The uploaded file, which must be present and carry a name.
    fn require_file(&mut self) -> Result<UploadedFile, ApiError> {
        let file = self
            .file
            .take()
            .ok_or_else(|| ApiError::validation("No file found"))?;
        if file.filename.is_empty() {
            return Err(ApiError::validation("No selected file"));
        }
        Ok(file)
    }
}

async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let file = UploadForm::read(multipart).await?.require_file()?;
    let file_name = state.uploads.save(&file.filename, &file.bytes).await?;
    info!("Uploaded {} ({} bytes)", file_name, file.bytes.len());

    Ok(Json(json!({
        "message": "File uploaded successfully",
        "file_name": file_name
    })))
}

async fn file_translate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranslationResult>, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.require_file()?;

    let extracted = state.extractor.extract(&file.filename, file.bytes).await?;
    let result = state
        .forwarder
        .translate(&extracted.content, form.target_lang.as_deref())
        .await?;

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct TranslateBody {
    text: Option<String>,
    target_lang: Option<String>,
}

async fn translate_text(
    State(state): State<AppState>,
    body: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    let text = body
        .text
        .ok_or_else(|| ApiError::validation("Text is required"))?;

    let result = state
        .forwarder
        .translate(&text, selected_lang(body.target_lang.as_deref()))
        .await?;

    Ok(Json(json!({ "translated_text": result.translated_text })))
}

async fn voice_translate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranslationResult>, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form
        .file
        .take()
        .ok_or_else(|| ApiError::validation("No file found"))?;

    let text = asr::transcribe(state.recognizer.as_ref(), &file.bytes).await?;
    let result = state
        .forwarder
        .translate(&text, form.target_lang.as_deref())
        .await?;

    Ok(Json(result))
}
