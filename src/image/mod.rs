//! Image domain: content sniffing, name generation, and storage.

pub mod name;
pub mod sniff;
pub mod storage;

pub use name::random_filename;
pub use sniff::sniff_extension;
pub use storage::{ImageStorage, LocalImageStorage};
