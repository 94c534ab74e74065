//! Static allow-list of image MIME types.
//!
//! Classification is a plain membership test; no content sniffing happens
//! here. Callers decide where the MIME string comes from (a declared upload
//! type or a disk-level sniff of stored bytes).

/// MIME types treated as images, covering legacy and modern raster and vector formats.
const IMAGE_MIME_TYPES: &[&str] = &[
    "image/avif",
    "image/bmp",
    "image/x-bmp",
    "image/x-ms-bmp",
    "image/cgm",
    "image/g3fax",
    "image/gif",
    "image/heic",
    "image/heif",
    "image/ief",
    "image/jpeg",
    "image/jpg",
    "image/pjpeg",
    "image/jxl",
    "image/ktx",
    "image/png",
    "image/x-png",
    "image/prs.btif",
    "image/sgi",
    "image/svg+xml",
    "image/tiff",
    "image/vnd.adobe.photoshop",
    "image/vnd.dece.graphic",
    "image/vnd.djvu",
    "image/vnd.dvb.subtitle",
    "image/vnd.dwg",
    "image/vnd.dxf",
    "image/vnd.fastbidsheet",
    "image/vnd.fpx",
    "image/vnd.fst",
    "image/vnd.fujixerox.edmics-mmr",
    "image/vnd.fujixerox.edmics-rlc",
    "image/vnd.microsoft.icon",
    "image/vnd.ms-modi",
    "image/vnd.ms-photo",
    "image/vnd.net-fpx",
    "image/vnd.wap.wbmp",
    "image/vnd.xiff",
    "image/webp",
    "image/x-3ds",
    "image/x-cmu-raster",
    "image/x-cmx",
    "image/x-freehand",
    "image/x-icon",
    "image/x-mrsid-image",
    "image/x-pcx",
    "image/x-pict",
    "image/x-portable-anymap",
    "image/x-portable-bitmap",
    "image/x-portable-graymap",
    "image/x-portable-pixmap",
    "image/x-rgb",
    "image/x-tga",
    "image/x-xbitmap",
    "image/x-xpixmap",
    "image/x-xwindowdump",
];

/// Check if a MIME type is in the image allow-list.
///
/// Matching ignores ASCII case and any `;`-separated parameters.
///
/// # Examples
///
/// ```
/// use fileforge_common::mime::is_image_mime;
///
/// assert!(is_image_mime("image/png"));
/// assert!(is_image_mime("IMAGE/JPEG; charset=binary"));
/// assert!(!is_image_mime("application/pdf"));
/// ```
pub fn is_image_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    IMAGE_MIME_TYPES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(essence))
}

/// Get the image MIME allow-list.
#[must_use]
pub fn image_mime_types() -> &'static [&'static str] {
    IMAGE_MIME_TYPES
}
