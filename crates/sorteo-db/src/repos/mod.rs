//! Repository modules
//!
//! Each domain aggregate has its own repository with CRUD and the
//! domain-specific queries settlement depends on.

pub mod balance;
pub mod billing;
pub mod commission;
pub mod drawing;
pub mod lottery;
pub mod registry;
pub mod result;
pub mod ticket;

pub use balance::BalanceRepo;
pub use billing::BillingRepo;
pub use commission::CommissionRepo;
pub use drawing::DrawingRepo;
pub use lottery::LotteryRepo;
pub use registry::RegistryRepo;
pub use result::ResultRepo;
pub use ticket::TicketRepo;
