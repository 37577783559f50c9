pub struct IdentityServiceConfig {
    /// Tenant domain of identity provider, e.g. `tenant.eu.auth0.com`
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
    /// Where identity provider sends user back with authorization code
    pub redirect_uri: String,
    /// Where identity provider sends user after logout
    pub logout_return_to: String,
}
