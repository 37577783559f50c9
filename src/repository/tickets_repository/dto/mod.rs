mod inserted_ticket;
mod ticket;

pub use inserted_ticket::InsertedTicket;
pub use ticket::Ticket;
