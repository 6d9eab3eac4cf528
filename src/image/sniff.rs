//! Content sniffing for uploaded files.
//!
//! The claimed filename extension is trivially spoofable, so uploads are
//! classified by their leading magic bytes and the result is compared
//! against the claimed extension.

/// Number of leading bytes examined when classifying an upload.
pub const SNIFF_LEN: usize = 512;

/// Determine the canonical extension for the given file content, or None
/// if it does not look like a supported raster image.
///
/// Only the first [`SNIFF_LEN`] bytes are examined. JPEG normalizes to
/// `.jpg` so it compares equal to the usual claimed extension.
pub fn sniff_extension(data: &[u8]) -> Option<&'static str> {
    let header = &data[..data.len().min(SNIFF_LEN)];
    let kind = infer::get(header)?;

    match kind.mime_type() {
        "image/jpeg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        "image/bmp" => Some(".bmp"),
        "image/tiff" => Some(".tiff"),
        _ => None,
    }
}
