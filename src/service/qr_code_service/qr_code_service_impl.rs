use super::QrCodeService;
use crate::error::Error;
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";
const MIN_DIMENSIONS: u32 = 200;

pub struct QrCodeServiceImpl;

impl QrCodeServiceImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QrCodeServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl QrCodeService for QrCodeServiceImpl {
    fn encode_data_url(&self, payload: &str) -> Result<String, Error> {
        let code = QrCode::new(payload.as_bytes()).map_err(|err| Error::QrCode(err.to_string()))?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(MIN_DIMENSIONS, MIN_DIMENSIONS)
            .build();

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|err| Error::QrCode(err.to_string()))?;

        Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png)))
    }
}
