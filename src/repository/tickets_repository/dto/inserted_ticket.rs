use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug)]
pub struct InsertedTicket {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
}
