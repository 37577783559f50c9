use crate::repository;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTicket {
    pub message: &'static str,
    pub ticket_id: Uuid,
    pub ticket_url: String,
    /// PNG data URL with QR code of `ticket_url`
    pub qr_code_image: String,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: Uuid,
    pub vatin: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: OffsetDateTime,
}

impl From<repository::Ticket> for Ticket {
    fn from(value: repository::Ticket) -> Self {
        Self {
            id: value.id,
            vatin: value.vatin,
            first_name: value.first_name,
            last_name: value.last_name,
            created_at: value.created_at,
        }
    }
}
