/// Cover image upload: native file pick plus the data-URL codec
///
/// An uploaded cover never touches the disk layout of the catalog; the
/// bytes are encoded into a `data:<mime>;base64,<payload>` string that is
/// stored inline on the book record. The base64 payload is additionally
/// percent-encoded, so the value is safe to embed anywhere a URL is.

use base64::{engine::general_purpose, Engine as _};
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not read the selected file: {0}")]
    Io(#[from] std::io::Error),
    #[error("the selected file is not a recognized image format")]
    UnknownFormat,
}

/// Show the native file picker, filtered to image files.
pub fn pick_image_file() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select a Cover Image")
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
        .pick_file()
}

/// Read an image file and encode it as a data URL.
/// The read buffer only lives for the duration of this call.
pub fn load_data_url(path: &Path) -> Result<String, UploadError> {
    let bytes = std::fs::read(path)?;
    encode_data_url(&bytes)
}

/// Encode image bytes as `data:<mime>;base64,<percent-encoded payload>`.
/// The MIME type is sniffed from the bytes, not taken from the file name.
pub fn encode_data_url(bytes: &[u8]) -> Result<String, UploadError> {
    let format = image::guess_format(bytes).map_err(|_| UploadError::UnknownFormat)?;
    let payload = general_purpose::STANDARD.encode(bytes);
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        urlencoding::encode(&payload)
    ))
}

/// Recover the raw image bytes from a data URL, for the preview widget.
/// Returns None for anything that isn't a well-formed data URL.
pub fn decode_data_url(src: &str) -> Option<Vec<u8>> {
    let rest = src.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(',')?;
    let payload = urlencoding::decode(payload).ok()?;
    general_purpose::STANDARD.decode(payload.as_bytes()).ok()
}
