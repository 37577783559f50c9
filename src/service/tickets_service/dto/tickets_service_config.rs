pub struct TicketsServiceConfig {
    /// Base of URLs encoded in QR codes, without trailing slash
    pub public_base_url: String,
    pub max_tickets_per_vatin: i64,
}
