//! Common error types used throughout fileforge.
//!
//! Failures raised by the storage and image collaborators are carried through
//! unchanged via `#[from]` conversions; the variants below only add the cases
//! fileforge itself detects.

/// Common error type for fileforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No disk is registered under the requested name.
    #[error("Unknown disk: {0}")]
    UnknownDisk(String),

    /// The requested file was not found.
    #[error("File not found: {0}")]
    NotFound(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding an image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A storage key tried to escape the disk root.
    #[error("Path traversal detected: {0}")]
    PathTraversal(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new UnknownDisk error.
    pub fn unknown_disk<S: Into<String>>(name: S) -> Self {
        Self::UnknownDisk(name.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
