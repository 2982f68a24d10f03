//! Core of the dice sorter: walks a folder of die photos and copies each
//! one into a subdirectory named after its face value.

pub mod config;
pub mod error;
pub mod label;
pub mod session;
pub mod storage;

pub use config::{LabelMode, SorterConfig};
pub use error::{ConfigError, SorterError, StorageError};
pub use label::{DieType, Label};
pub use session::{ClassifierSession, ImageEntry, LastAction, RootDirectory};
pub use storage::{DirEntry, DirectoryAccess, EntryKind, FsDirectory};

/// File name suffixes offered for classification, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Whether `name` looks like an image the sorter can show.
pub fn is_supported_image(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
