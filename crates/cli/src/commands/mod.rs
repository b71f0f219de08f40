//! Command implementations, one module per subcommand group.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod orders;
