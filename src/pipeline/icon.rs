//! Launcher icon normalization.
//!
//! Uploaded icons arrive in whatever format the browser sent; the project
//! directory always stores a PNG so the packaging step sees a single format.

use std::io::Cursor;

use image::ImageFormat;

use super::error::{Error, Result};

/// File name of the launcher icon inside the project directory.
pub const ICON_FILE_NAME: &str = "ic_launcher.png";

/// Decodes uploaded image bytes and re-encodes them as PNG.
///
/// # Errors
///
/// [`Error::InvalidRequest`] when the bytes are not a decodable image. This
/// runs before any filesystem side effect, so a bad icon rejects the whole
/// request cleanly.
pub fn normalize_icon(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes).map_err(|e| Error::InvalidRequest {
        reason: format!("icon is not a decodable image: {e}"),
    })?;

    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| Error::InvalidRequest {
            reason: format!("icon could not be converted to PNG: {e}"),
        })?;

    Ok(png)
}
