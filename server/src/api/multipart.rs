use crate::error::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::Multipart;
use std::collections::HashMap;

/// Buffered contents of a multipart form: text fields and file parts by name.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Bytes>,
}

impl FormData {
    /// Reads every part. Parts with a filename, or that aren't UTF-8, are files.
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let is_file = field.file_name().is_some();
            let data = field.bytes().await?;

            if is_file {
                form.files.insert(name, data);
                continue;
            }
            match String::from_utf8(data.to_vec()) {
                Ok(text) => {
                    form.fields.insert(name, text);
                }
                Err(_) => {
                    form.files.insert(name, data);
                }
            }
        }

        Ok(form)
    }

    /// Non-blank text field, returned as sent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Integer text field; absent is `None`, present but malformed is a 400.
    pub fn id(&self, name: &str) -> ApiResult<Option<i32>> {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ApiError::bad_request(format!("{name} must be an integer"))),
        }
    }

    /// Non-empty file part.
    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files
            .get(name)
            .map(|b| b.as_ref())
            .filter(|b| !b.is_empty())
    }
}
