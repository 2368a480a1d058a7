pub mod buy_multiple_tickets;
pub mod buy_ticket;
pub mod draw_multiple_winners;
pub mod get_lottery;
pub mod initialize_lottery;

pub use buy_multiple_tickets::*;
pub use buy_ticket::*;
pub use draw_multiple_winners::*;
pub use get_lottery::*;
pub use initialize_lottery::*;
