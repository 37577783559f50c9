pub struct ManagementTokenServiceConfig {
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
}
