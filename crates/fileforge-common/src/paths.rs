//! Path utilities for building and normalising storage keys.
//!
//! Two join conventions coexist. [`join_image_path`] is the literal
//! `path + "/" + filename` used when a transformed image is written, while
//! [`join_key`] is the disk convention used for raw uploads. The difference is
//! observable (an empty directory yields `"/name"` versus `"name"`) and is kept
//! on purpose.

use crate::error::{Error, Result};

/// Join a directory and filename with a single `/`, without any cleanup.
///
/// # Examples
///
/// ```
/// use fileforge_common::paths::join_image_path;
///
/// assert_eq!(join_image_path("avatars", "a.png"), "avatars/a.png");
/// assert_eq!(join_image_path("", "a.png"), "/a.png");
/// assert_eq!(join_image_path("avatars/", "a.png"), "avatars//a.png");
/// ```
pub fn join_image_path(path: &str, filename: &str) -> String {
    format!("{}/{}", path, filename)
}

/// Join a directory and filename the way disks report stored keys.
///
/// Leading, trailing, and repeated separators are collapsed.
///
/// # Examples
///
/// ```
/// use fileforge_common::paths::join_key;
///
/// assert_eq!(join_key("", "a.pdf"), "a.pdf");
/// assert_eq!(join_key("documents/", "a.pdf"), "documents/a.pdf");
/// assert_eq!(join_key("/a//b/", "c.pdf"), "a/b/c.pdf");
/// ```
pub fn join_key(directory: &str, name: &str) -> String {
    directory
        .split('/')
        .chain(name.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Split a storage key into its segments.
///
/// Empty and `.` segments are dropped. A `..` segment is rejected because it
/// could resolve outside the disk root.
pub fn normalize_key(key: &str) -> Result<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in key.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(Error::PathTraversal(key.to_string())),
            other => segments.push(other),
        }
    }
    Ok(segments)
}

/// Lowercase extension of a filename, if it has one.
///
/// # Examples
///
/// ```
/// use fileforge_common::paths::extension_of;
///
/// assert_eq!(extension_of("photo.JPG"), Some("jpg".to_string()));
/// assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
/// assert_eq!(extension_of("README"), None);
/// ```
pub fn extension_of(name: &str) -> Option<String> {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext.to_lowercase()),
        _ => None,
    }
}
