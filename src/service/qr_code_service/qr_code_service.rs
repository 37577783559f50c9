use crate::error::Error;

#[cfg_attr(test, mockall::automock)]
pub trait QrCodeService: Send + Sync {
    ///
    /// Renders `payload` as QR code PNG image
    ///
    /// ### Returns
    /// image as `data:image/png;base64,...` URL, ready to be used as `src` of `img`
    ///
    /// ### Errors
    /// - [Error::QrCode] when payload doesn't fit into QR code
    ///
    fn encode_data_url(&self, payload: &str) -> Result<String, Error>;
}
