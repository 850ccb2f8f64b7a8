//! Image-backed shape.

use super::{centered_extent, scaled_size};
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Image format for stored image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Svg,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        let start = data.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(data.len());
        let head = &data[start..];
        if head.starts_with(b"<svg") || head.starts_with(b"<?xml") {
            return Some(ImageFormat::Svg);
        }

        None
    }

    /// Detect from the bytes first, then from the source path's extension.
    pub fn detect(data: &[u8], source: &str) -> Option<Self> {
        Self::from_magic_bytes(data).or_else(|| {
            source
                .rsplit_once('.')
                .and_then(|(_, ext)| Self::from_extension(ext))
        })
    }
}

/// Loaded image bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub format: ImageFormat,
    /// Image data as a base64-encoded string so it embeds directly in JSON.
    pub data_base64: String,
}

impl ImageData {
    pub fn new(format: ImageFormat, data: &[u8]) -> Self {
        Self {
            format,
            data_base64: STANDARD.encode(data),
        }
    }

    /// Get the raw image data (decoded from base64).
    pub fn data(&self) -> Option<Vec<u8>> {
        STANDARD.decode(&self.data_base64).ok()
    }

    /// `data:` URL suitable for embedding in markup.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.data_base64)
    }
}

/// Where an image comes from and, once loaded, its bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ImageData>,
}

impl ImageHandle {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            data: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }
}

/// An image shape centered on its shape position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageHandle>,
}

impl Image {
    pub const DEFAULT_SIZE: f64 = 100.0;
    pub const DEFAULT_SOURCE: &'static str = "./science.svg";

    pub fn new(width: f64, height: f64, source: impl Into<String>) -> Self {
        Self {
            width,
            height,
            image: Some(ImageHandle::new(source)),
        }
    }

    pub fn extent(&self) -> Rect {
        centered_extent(self.width, self.height)
    }

    pub fn bake_scale(&mut self, scale_x: f64, scale_y: f64, min: f64) {
        self.width = scaled_size(self.width, scale_x, min);
        self.height = scaled_size(self.height, scale_y, min);
    }

    pub fn source(&self) -> Option<&str> {
        self.image.as_ref().map(|handle| handle.source.as_str())
    }

    /// Loaded bytes, if the image has finished loading.
    pub fn loaded(&self) -> Option<&ImageData> {
        self.image.as_ref().and_then(|handle| handle.data.as_ref())
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE, Self::DEFAULT_SOURCE)
    }
}
