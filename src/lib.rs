//! Fileforge - File and image upload orchestration
//!
//! Uploads are bound to a [`SourceFile`], optionally resized or cropped, and
//! written to one of the named disks held by a [`Storage`].

pub mod config;
pub mod source;
pub mod storage;
pub mod transform;
pub mod uploader;

pub use fileforge_common::{Error, Result};
pub use source::SourceFile;
pub use storage::{Disk, ImageProbe, LocalDisk, Storage};
pub use uploader::FileUploader;
