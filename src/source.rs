//! In-memory handle for an uploaded file.
//!
//! A [`SourceFile`] carries the client's original filename, the declared MIME
//! type, and the raw bytes. Its generated hash name is computed once, at
//! construction, so every upload made from the same handle lands under the
//! same name.

use std::path::Path;

use fileforge_common::mime::is_image_mime;
use fileforge_common::paths::extension_of;
use fileforge_common::{Error, Result};
use sha2::{Digest, Sha256};

/// Number of hex characters in a generated hash name (without extension).
const HASH_NAME_LEN: usize = 40;

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    original_name: String,
    extension: Option<String>,
    mime_type: String,
    hash_name: String,
    bytes: Vec<u8>,
}

impl SourceFile {
    /// Create a source file from the client's filename and the uploaded bytes.
    ///
    /// The declared MIME type is guessed from the filename extension, falling
    /// back to `application/octet-stream`.
    pub fn new(original_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let original_name = original_name.into();
        let bytes = bytes.into();
        let extension = extension_of(&original_name);
        let mime_type = mime_guess::from_path(&original_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let hash_name = generate_hash_name(&bytes, extension.as_deref());

        Self {
            original_name,
            extension,
            mime_type,
            hash_name,
            bytes,
        }
    }

    /// Read a temporary upload from disk.
    ///
    /// The original name is the file name component of `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let original_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::invalid_input(format!("Not a file path: {}", path.display())))?
            .to_string();
        let bytes = std::fs::read(path)?;
        Ok(Self::new(original_name, bytes))
    }

    /// Override the declared MIME type (e.g. with a multipart `Content-Type`).
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Lowercase extension of the client filename.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Generated storage name, including the extension when there is one.
    pub fn hash_name(&self) -> &str {
        &self.hash_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Classify by the declared MIME type.
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

/// Hash name: the first 40 hex chars of the content's SHA-256, plus extension.
fn generate_hash_name(bytes: &[u8], extension: Option<&str>) -> String {
    let digest = Sha256::digest(bytes);
    let mut name = hex::encode(digest);
    name.truncate(HASH_NAME_LEN);
    match extension {
        Some(ext) => format!("{}.{}", name, ext),
        None => name,
    }
}
