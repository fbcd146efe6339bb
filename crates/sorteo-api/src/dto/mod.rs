//! Request and response bodies

pub mod balance;
pub mod billing;
pub mod drawing;
pub mod ticket;

pub use balance::*;
pub use billing::*;
pub use drawing::*;
pub use ticket::*;
