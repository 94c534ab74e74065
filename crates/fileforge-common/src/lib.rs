//! Fileforge-Common: Shared error type, MIME tables, and path helpers.
//!
//! This crate provides common functionality used across fileforge:
//!
//! - **Error Handling**: The unified [`Error`] type and [`Result`] alias
//! - **MIME Tables**: The static allow-list of image MIME types
//! - **Path Utilities**: Storage key normalisation and filename joins
//!
//! # Examples
//!
//! ```
//! use fileforge_common::{Error, Result};
//! use fileforge_common::mime::is_image_mime;
//! use fileforge_common::paths::join_key;
//!
//! assert!(is_image_mime("image/png"));
//! assert_eq!(join_key("avatars/", "a.png"), "avatars/a.png");
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("avatars/a.png"))
//! }
//! ```

pub mod error;
pub mod mime;
pub mod paths;

pub use error::{Error, Result};
