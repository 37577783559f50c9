use super::{InsertedTicket, Ticket};
use crate::repository::Error;
use axum::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsRepository: Send + Sync {
    ///
    /// Counts tickets issued for vatin
    ///
    async fn count_by_vatin(&self, vatin: &str) -> Result<i64, Error>;

    ///
    /// Counts all issued tickets
    ///
    async fn count_all(&self) -> Result<i64, Error>;

    ///
    /// Inserts new ticket. `created_at` is assigned by the database.
    ///
    /// Count check and insert are atomic for tickets with the same vatin,
    /// so concurrent inserts can't exceed `max_per_vatin`.
    ///
    /// ### Errors
    /// - [Error::QuotaExceeded] when vatin already has `max_per_vatin` tickets
    /// - [Error::InsertUniqueViolation] when ticket with id already exists
    ///
    async fn insert(
        &self,
        id: Uuid,
        vatin: &str,
        first_name: &str,
        last_name: &str,
        max_per_vatin: i64,
    ) -> Result<InsertedTicket, Error>;

    async fn find(&self, id: Uuid) -> Result<Option<Ticket>, Error>;
}
