use serde::Deserialize;

#[derive(Deserialize)]
pub struct ClientCredentialsResponse {
    pub access_token: String,
    /// Seconds
    pub expires_in: u64,
}
