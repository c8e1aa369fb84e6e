//! `stockroom` presentation shell.
//!
//! A menu-driven text interface over one [`stockroom_inventory::Inventory`].
//! It owns no state beyond that inventory and calls only its public operations.

pub mod config;
pub mod shell;

pub use config::Args;
pub use shell::Shell;
