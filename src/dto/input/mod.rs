mod login_callback;
mod login_query;
mod ticket;

pub use login_callback::*;
pub use login_query::*;
pub use ticket::*;
