pub use lottery::*;
pub use participant::*;

pub mod lottery;
pub mod participant;
