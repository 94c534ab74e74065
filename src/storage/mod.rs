//! Named storage disks.
//!
//! A [`Disk`] is a backend addressed by relative keys; [`Storage`] keeps the
//! registry of disks by name and hosts the helpers that are not tied to a
//! single upload (deleting and classifying stored files).

mod local;

pub use local::LocalDisk;

use std::collections::HashMap;
use std::path::PathBuf;

use fileforge_common::mime::is_image_mime;
use fileforge_common::{Error, Result};

use crate::config::{Config, ImageConfig};
use crate::source::SourceFile;
use crate::uploader::FileUploader;

/// Storage backend interface.
pub trait Disk: Send + Sync {
    /// Name this disk is registered under.
    fn name(&self) -> &str;

    /// Whether a file is stored at `path`. Directories do not count.
    fn exists(&self, path: &str) -> Result<bool>;

    fn directory_exists(&self, path: &str) -> Result<bool>;

    /// Read the stored bytes.
    fn get(&self, path: &str) -> Result<Vec<u8>>;

    /// Write bytes, creating parent directories as needed.
    fn put(&self, path: &str, contents: &[u8]) -> Result<()>;

    /// Store an uploaded file's raw bytes as `directory/name`.
    ///
    /// Returns the key the file was stored under.
    fn put_file_as(&self, directory: &str, file: &SourceFile, name: &str) -> Result<String>;

    fn delete(&self, path: &str) -> Result<()>;

    /// Create a directory and any missing parents.
    fn make_directory(&self, path: &str) -> Result<()>;

    /// Absolute location of a key on this disk.
    fn path(&self, path: &str) -> Result<PathBuf>;

    /// MIME type of the stored content.
    fn mime_type(&self, path: &str) -> Result<String>;

    /// Size of the stored content in bytes.
    fn size(&self, path: &str) -> Result<u64>;

    /// Public URL for a key.
    fn url(&self, path: &str) -> Result<String>;
}

/// Input accepted by [`Storage::is_image`].
#[derive(Debug, Clone, Copy)]
pub enum ImageProbe<'a> {
    /// An in-memory upload, classified by its declared MIME type.
    File(&'a SourceFile),
    /// A stored file, classified by the disk's MIME detection.
    Stored { disk: &'a str, path: &'a str },
}

/// Registry of named disks.
pub struct Storage {
    disks: HashMap<String, Box<dyn Disk>>,
    default_disk: String,
    images: ImageConfig,
}

impl Storage {
    /// Create an empty registry whose uploads target `default_disk`.
    pub fn new(default_disk: impl Into<String>) -> Self {
        Self {
            disks: HashMap::new(),
            default_disk: default_disk.into(),
            images: ImageConfig::default(),
        }
    }

    /// Build a registry of local disks from configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut storage = Self::new(config.default_disk.clone()).with_images(config.images.clone());
        for disk in &config.disks {
            let mut local = LocalDisk::new(disk.name.clone(), disk.root.clone());
            if let Some(url) = &disk.url {
                local = local.with_url(url.clone());
            }
            storage = storage.with_disk(local);
        }
        storage
    }

    /// Register a disk, replacing any disk with the same name.
    #[must_use]
    pub fn with_disk(mut self, disk: impl Disk + 'static) -> Self {
        self.disks.insert(disk.name().to_string(), Box::new(disk));
        self
    }

    #[must_use]
    pub fn with_images(mut self, images: ImageConfig) -> Self {
        self.images = images;
        self
    }

    /// Look up a disk by name.
    pub fn disk(&self, name: &str) -> Result<&dyn Disk> {
        self.disks
            .get(name)
            .map(|disk| disk.as_ref())
            .ok_or_else(|| Error::unknown_disk(name))
    }

    pub fn default_disk(&self) -> &str {
        &self.default_disk
    }

    pub fn images(&self) -> &ImageConfig {
        &self.images
    }

    /// Start an upload of `file` against this storage.
    pub fn uploader(&self, file: SourceFile) -> FileUploader<'_> {
        FileUploader::make(self, file)
    }

    /// Delete a stored file if it exists.
    ///
    /// A missing file is not an error.
    pub fn delete(&self, disk: &str, path: &str) -> Result<()> {
        let disk = self.disk(disk)?;
        if disk.exists(path)? {
            disk.delete(path)?;
            tracing::debug!("Deleted {} from disk {}", path, disk.name());
        }
        Ok(())
    }

    /// Check whether an upload or a stored file is an image.
    ///
    /// Stored paths that do not exist are not images.
    pub fn is_image(&self, probe: ImageProbe<'_>) -> Result<bool> {
        match probe {
            ImageProbe::File(file) => Ok(file.is_image()),
            ImageProbe::Stored { disk, path } => {
                let disk = self.disk(disk)?;
                if !disk.exists(path)? {
                    return Ok(false);
                }
                Ok(is_image_mime(&disk.mime_type(path)?))
            }
        }
    }
}
