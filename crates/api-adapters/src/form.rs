//! Multipart form reader shared by the upload handlers.

use std::collections::HashMap;

use axum::extract::Multipart;
use domains::{AppError, UploadedFile};

use crate::error::ApiError;

/// Text fields and files of one multipart submission, keyed by field name.
#[derive(Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Drains the whole multipart stream into memory. Uploads are bounded
    /// by the router's body limit before they get here.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = FormData::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| AppError::Validation(format!("Invalid multipart body: {err}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if let Some(file_name) = field.file_name().map(str::to_string) {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::Validation(format!("Invalid upload: {err}")))?;
                form.files.insert(name, UploadedFile::new(file_name, bytes));
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|err| AppError::Validation(format!("Invalid form field: {err}")))?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    /// Text field value, or empty string when absent (services treat
    /// empty as missing).
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
