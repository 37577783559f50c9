use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketsService: Send + Sync {
    ///
    /// Issues new ticket for the person.
    ///
    /// ### Returns
    /// [output::CreatedTicket] with URL of the ticket and its QR code
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - any of the fields is empty
    ///     - vatin is not made of exactly 11 digits
    /// - [Error::QuotaExceeded] when person already has maximum number of tickets
    ///
    async fn create_ticket(&self, ticket: input::Ticket) -> Result<output::CreatedTicket, Error>;

    ///
    /// Counts all issued tickets
    ///
    async fn count_tickets(&self) -> Result<i64, Error>;

    ///
    /// Finds ticket by its id
    ///
    /// ### Errors
    /// - [Error::TicketNotExist] when ticket with id does not exist
    ///
    async fn find_ticket(&self, id: Uuid) -> Result<output::Ticket, Error>;
}
