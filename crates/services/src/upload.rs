//! Shared helpers for uploaded files: size limits, blob-name generation,
//! and the image type check.

use domains::{AppError, Result, UploadedFile};
use uuid::Uuid;

/// Avatars above this size are rejected.
pub const MAX_AVATAR_BYTES: usize = 500_000;

/// Post thumbnails above this size are rejected.
pub const MAX_THUMBNAIL_BYTES: usize = 2_000_000;

const MAX_STEM_CHARS: usize = 40;
const MAX_EXT_CHARS: usize = 8;

/// Derives a collision-resistant blob name from a client filename,
/// keeping the (sanitized) stem and extension: `report-<uuid>.png`.
///
/// The client name is untrusted: any path components are stripped and
/// only ASCII alphanumerics, `-` and `_` survive.
pub fn unique_blob_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    let (raw_stem, raw_ext) = match base.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => (stem, Some(ext)),
        _ => (base, None),
    };

    let mut stem: String = raw_stem
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_STEM_CHARS)
        .collect();
    if stem.is_empty() {
        stem.push_str("upload");
    }

    let ext: Option<String> = raw_ext.map(|e| {
        e.chars()
            .filter(char::is_ascii_alphanumeric)
            .take(MAX_EXT_CHARS)
            .collect::<String>()
            .to_ascii_lowercase()
    });

    match ext {
        Some(ext) if !ext.is_empty() => format!("{stem}-{}.{ext}", Uuid::new_v4()),
        _ => format!("{stem}-{}", Uuid::new_v4()),
    }
}

/// Rejects uploads that are missing, oversized, or do not look like an
/// image by extension. `label` names the field in error messages.
pub fn validate_image(file: &UploadedFile, max_bytes: usize, label: &str) -> Result<()> {
    if file.is_empty() {
        return Err(AppError::Validation(format!("Please upload an image as {label}.")));
    }
    if file.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "{label} is too large. Should be less than {}kb.",
            max_bytes / 1000
        )));
    }
    let looks_like_image = mime_guess::from_path(&file.file_name)
        .first()
        .map(|m| m.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false);
    if !looks_like_image {
        return Err(AppError::Validation(format!(
            "{label} must be an image file."
        )));
    }
    Ok(())
}
