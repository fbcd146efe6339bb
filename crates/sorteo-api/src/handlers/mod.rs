//! Request handlers

pub mod balance;
pub mod billing;
pub mod drawing;
pub mod health;
pub mod ticket;
