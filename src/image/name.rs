//! Random filename generation for stored images.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

/// Random bytes per generated token. 48 bits keeps collisions negligible
/// at this service's scale; no retry-on-collision exists.
pub const TOKEN_BYTES: usize = 6;

/// Generate a new filename as `<url-safe token><extension>`.
///
/// The extension must include its leading dot and is appended verbatim.
pub fn random_filename(extension: &str) -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}{}", URL_SAFE_NO_PAD.encode(bytes), extension)
}
