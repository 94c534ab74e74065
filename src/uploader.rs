//! Upload orchestration.
//!
//! A [`FileUploader`] is created per upload, optionally transforms the source
//! image, then persists either the transformed pixels or the raw bytes to a
//! named disk.
//!
//! ```no_run
//! use fileforge::{SourceFile, Storage};
//! use fileforge::config::load_config_or_default;
//!
//! # fn main() -> anyhow::Result<()> {
//! let storage = Storage::from_config(&load_config_or_default(None)?);
//! let avatar = SourceFile::open(std::path::Path::new("/tmp/upload-1234.png"))?;
//!
//! let path = storage
//!     .uploader(avatar)
//!     .fit(256, 256, true)?
//!     .upload_as("jane.png", "avatars")?;
//! println!("avatar stored at {path}");
//! # Ok(())
//! # }
//! ```

use fileforge_common::paths::join_image_path;
use fileforge_common::Result;
use image::DynamicImage;

use crate::source::SourceFile;
use crate::storage::Storage;
use crate::transform;

/// Transforms and persists a single uploaded file.
///
/// Persistence writes the transformed image when a transform has been
/// applied, and the untouched source bytes otherwise.
pub struct FileUploader<'a> {
    storage: &'a Storage,
    file: SourceFile,
    image: Option<DynamicImage>,
    disk: String,
}

impl<'a> FileUploader<'a> {
    /// Bind a new uploader to `file`, targeting the storage's default disk.
    pub fn make(storage: &'a Storage, file: SourceFile) -> Self {
        Self {
            storage,
            file,
            image: None,
            disk: storage.default_disk().to_string(),
        }
    }

    /// Select the disk uploads and replacements go to.
    #[must_use]
    pub fn disk(mut self, name: impl Into<String>) -> Self {
        self.disk = name.into();
        self
    }

    pub fn source(&self) -> &SourceFile {
        &self.file
    }

    /// Whether a transformed image will be written instead of the raw bytes.
    pub fn has_transform(&self) -> bool {
        self.image.is_some()
    }

    /// Dimensions of the transformed image, if any.
    pub fn transformed_dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| (img.width(), img.height()))
    }

    /// Upload under the source's hash name.
    pub fn upload(&self, path: &str) -> Result<String> {
        self.upload_as("", path)
    }

    /// Upload under `filename`, or the hash name when `filename` is empty.
    ///
    /// The filename is used verbatim and must carry its own extension.
    /// Returns the stored path on the selected disk.
    pub fn upload_as(&self, filename: &str, path: &str) -> Result<String> {
        let filename = if filename.is_empty() {
            self.file.hash_name()
        } else {
            filename
        };
        let disk = self.storage.disk(&self.disk)?;

        let Some(img) = &self.image else {
            let stored = disk.put_file_as(path, &self.file, filename)?;
            tracing::info!("Stored {} on disk {}", stored, disk.name());
            return Ok(stored);
        };

        let image_path = join_image_path(path, filename);
        if !disk.directory_exists(path)? {
            disk.make_directory(path)?;
        }

        let fallback = image::guess_format(self.file.bytes()).ok();
        let encoded = transform::encode(
            img,
            filename,
            fallback,
            self.storage.images().jpeg_quality,
        )?;
        disk.put(&image_path, &encoded)?;

        tracing::info!(
            width = img.width(),
            height = img.height(),
            "Stored image {} on disk {}",
            image_path,
            disk.name()
        );
        Ok(image_path)
    }

    /// Delete `old_path`, then upload under the hash name.
    pub fn replace(&self, old_path: &str, path: &str) -> Result<String> {
        self.replace_as(old_path, "", path)
    }

    /// Delete `old_path`, then upload under `new_filename`.
    pub fn replace_as(&self, old_path: &str, new_filename: &str, path: &str) -> Result<String> {
        tracing::debug!("Replacing {} on disk {}", old_path, self.disk);
        self.storage.delete(&self.disk, old_path)?;
        self.upload_as(new_filename, path)
    }

    /// Shrink an image source to fit within `max_width` x `max_height`.
    ///
    /// Non-image sources are left untouched. Images already within the caps
    /// are still decoded, so persisting re-encodes them.
    pub fn downsize(mut self, max_width: u32, max_height: u32) -> Result<Self> {
        if !self.file.is_image() {
            tracing::debug!(
                "Skipping downsize of non-image {} ({})",
                self.file.original_name(),
                self.file.mime_type()
            );
            return Ok(self);
        }

        let img = transform::decode(&self.file)?;
        let filter = self.storage.images().filter.into();
        self.image = Some(transform::downsize(img, max_width, max_height, filter)?);
        Ok(self)
    }

    /// Scale and centre-crop an image source to exactly `width` x `height`.
    ///
    /// With `dont_upsize`, a source smaller than the target is not enlarged
    /// and the output shrinks accordingly. Non-image sources are left untouched.
    pub fn fit(mut self, width: u32, height: u32, dont_upsize: bool) -> Result<Self> {
        if !self.file.is_image() {
            tracing::debug!(
                "Skipping fit of non-image {} ({})",
                self.file.original_name(),
                self.file.mime_type()
            );
            return Ok(self);
        }

        let img = transform::decode(&self.file)?;
        let filter = self.storage.images().filter.into();
        self.image = Some(transform::fit(&img, width, height, dont_upsize, filter)?);
        Ok(self)
    }
}
