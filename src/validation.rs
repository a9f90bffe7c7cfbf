use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::NaiveDate;

use crate::error::{ApiError, FieldErrors};
use crate::routes::tasks::tasks_models::TaskPayload;

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

// Decoded image attachment, ready to hand to the asset store.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

// Fields that passed validation. `is_private` stays optional so the
// caller can distinguish "omitted" (keep/default) from an explicit value.
#[derive(Debug)]
pub struct ValidTaskFields {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub image: Option<ImagePayload>,
    pub is_private: Option<bool>,
}

/// Checks every field and reports all failures at once, keyed by field
/// name. Nothing is written when any field is invalid.
pub fn validate_task_payload(payload: &TaskPayload) -> Result<ValidTaskFields, ApiError> {
    let mut errors = FieldErrors::new();

    let title = match payload.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => {
            if t.chars().count() > MAX_TITLE_LEN {
                add_error(
                    &mut errors,
                    "title",
                    format!("The title must not be greater than {} characters.", MAX_TITLE_LEN),
                );
                None
            } else {
                Some(t.to_string())
            }
        }
        _ => {
            add_error(&mut errors, "title", "The title field is required.".into());
            None
        }
    };

    let description = match payload.description.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => Some(d.to_string()),
        _ => {
            add_error(
                &mut errors,
                "description",
                "The description field is required.".into(),
            );
            None
        }
    };

    let due_date = match payload.due_date.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => match NaiveDate::parse_from_str(d, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                add_error(
                    &mut errors,
                    "due_date",
                    "The due date must be a valid date (YYYY-MM-DD).".into(),
                );
                None
            }
        },
        _ => {
            add_error(
                &mut errors,
                "due_date",
                "The due date field is required and must be a parseable date.".into(),
            );
            None
        }
    };

    let image = match payload.image.as_deref() {
        Some(encoded) if !encoded.is_empty() => match decode_image(encoded) {
            Ok(img) => Some(img),
            Err(msg) => {
                add_error(&mut errors, "image", msg);
                None
            }
        },
        _ => None,
    };

    match (title, description, due_date) {
        (Some(title), Some(description), Some(due_date)) if errors.is_empty() => {
            Ok(ValidTaskFields {
                title,
                description,
                due_date,
                image,
                is_private: payload.is_private,
            })
        }
        _ => Err(ApiError::Validation(errors)),
    }
}

fn decode_image(encoded: &str) -> Result<ImagePayload, String> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|_| "The image must be valid base64 data.".to_string())?;

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err("The image must not be greater than 2048 kilobytes.".to_string());
    }

    let format = image::guess_format(&bytes)
        .map_err(|_| "The image must be an image file.".to_string())?;
    let extension = format
        .extensions_str()
        .first()
        .copied()
        .unwrap_or("bin");

    Ok(ImagePayload { bytes, extension })
}

fn add_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}
