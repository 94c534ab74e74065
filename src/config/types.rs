use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Disk used when an upload does not name one
    #[serde(default = "default_disk")]
    pub default_disk: String,

    #[serde(default = "default_disks")]
    pub disks: Vec<DiskConfig>,

    #[serde(default)]
    pub images: ImageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_disk: default_disk(),
            disks: default_disks(),
            images: ImageConfig::default(),
        }
    }
}

fn default_disk() -> String {
    "public".to_string()
}

fn default_disks() -> Vec<DiskConfig> {
    vec![
        DiskConfig {
            name: "local".to_string(),
            root: PathBuf::from("./storage/app"),
            url: None,
        },
        DiskConfig {
            name: "public".to_string(),
            root: PathBuf::from("./storage/app/public"),
            url: Some("/storage".to_string()),
        },
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiskConfig {
    pub name: String,

    /// Directory that keys on this disk resolve against
    pub root: PathBuf,

    /// Public URL prefix for files on this disk
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    /// JPEG quality used when re-encoding transformed images (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    #[serde(default)]
    pub filter: ResizeFilter,
}

fn default_jpeg_quality() -> u8 {
    90
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            filter: ResizeFilter::default(),
        }
    }
}

/// Resampling filter applied when resizing images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
