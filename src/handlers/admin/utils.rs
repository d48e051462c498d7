use axum::extract::Multipart;
use serde_json::Value;

use crate::assets::AssetUpload;
use crate::error::ApiError;
use crate::store::Document;

/// Read a multipart payload into text fields plus at most one binary upload
/// taken from `file_field`. Text parts become string fields keyed by part name.
pub async fn read_multipart(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<(Document, Option<AssetUpload>), ApiError> {
    let mut fields = Document::new();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == file_field {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?
                .to_vec();
            upload = Some(AssetUpload { bytes, file_name, content_type });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid field '{}': {}", name, e)))?;
            fields.insert(name, Value::String(text));
        }
    }

    Ok((fields, upload))
}

/// Require a JSON object body, returning its map.
pub fn require_object(body: Value) -> Result<Document, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request("Expected a JSON object body")),
    }
}

/// Whitespace-separated word count for quote length limits.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(word_count("  one   two\nthree "), 3);
        assert_eq!(word_count(""), 0);
    }
}
