use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("qr encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("png encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub trait QrRenderer: Send + Sync {
    fn render(&self, data: &str) -> Result<Vec<u8>, QrError>;
}

/// Renders black-on-white PNG codes at least `size` pixels wide.
pub struct PngQrRenderer {
    pub size: u32,
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self { size: 320 }
    }
}

impl QrRenderer for PngQrRenderer {
    fn render(&self, data: &str) -> Result<Vec<u8>, QrError> {
        let code = QrCode::new(data.as_bytes())?;
        let img = code
            .render::<Luma<u8>>()
            .min_dimensions(self.size, self.size)
            .quiet_zone(true)
            .build();

        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(img).write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}
