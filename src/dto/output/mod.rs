mod login;
mod ticket;

pub use login::*;
pub use ticket::*;
