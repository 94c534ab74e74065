use std::path::PathBuf;

use fileforge_common::paths::{join_key, normalize_key};
use fileforge_common::{Error, Result};

use super::Disk;
use crate::source::SourceFile;

/// Local filesystem disk.
///
/// Keys resolve beneath `root`; `..` segments are refused.
pub struct LocalDisk {
    name: String,
    root: PathBuf,
    url: Option<String>,
}

impl LocalDisk {
    pub fn new(name: impl Into<String>, root: PathBuf) -> Self {
        Self {
            name: name.into(),
            root,
            url: None,
        }
    }

    /// Set the public URL prefix for this disk.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn resolve_path(&self, key: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in normalize_key(key)? {
            path.push(segment);
        }
        Ok(path)
    }

    fn resolve_existing(&self, key: &str) -> Result<PathBuf> {
        let path = self.resolve_path(key)?;
        if !path.is_file() {
            return Err(Error::not_found(format!("{}:{}", self.name, key)));
        }
        Ok(path)
    }
}

impl Disk for LocalDisk {
    fn name(&self) -> &str {
        &self.name
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve_path(path)?.is_file())
    }

    fn directory_exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve_path(path)?.is_dir())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        let path = self.resolve_existing(path)?;
        Ok(std::fs::read(path)?)
    }

    fn put(&self, path: &str, contents: &[u8]) -> Result<()> {
        let path = self.resolve_path(path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(())
    }

    fn put_file_as(&self, directory: &str, file: &SourceFile, name: &str) -> Result<String> {
        let key = join_key(directory, name);
        self.put(&key, file.bytes())?;
        Ok(key)
    }

    fn delete(&self, path: &str) -> Result<()> {
        let path = self.resolve_existing(path)?;
        std::fs::remove_file(path)?;
        Ok(())
    }

    fn make_directory(&self, path: &str) -> Result<()> {
        std::fs::create_dir_all(self.resolve_path(path)?)?;
        Ok(())
    }

    fn path(&self, path: &str) -> Result<PathBuf> {
        self.resolve_path(path)
    }

    fn mime_type(&self, path: &str) -> Result<String> {
        let location = self.resolve_existing(path)?;
        if let Some(kind) = infer::get_from_path(&location)? {
            return Ok(kind.mime_type().to_string());
        }
        Ok(mime_guess::from_path(&location)
            .first_or_octet_stream()
            .essence_str()
            .to_string())
    }

    fn size(&self, path: &str) -> Result<u64> {
        let location = self.resolve_existing(path)?;
        Ok(std::fs::metadata(location)?.len())
    }

    fn url(&self, path: &str) -> Result<String> {
        let base = self.url.as_deref().ok_or_else(|| {
            Error::invalid_input(format!("Disk '{}' has no public URL", self.name))
        })?;
        Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            normalize_key(path)?.join("/")
        ))
    }
}
