//! Inventory domain module.
//!
//! Owns the product collection and the undo history. Mutations are recorded as
//! reversible [`Action`]s; queries go through search strategies and sort
//! orders over the current snapshot. No printing: every failure comes back as
//! a [`kiputech_core::DomainError`].

pub mod action;
pub mod config;
pub mod import;
pub mod inventory;
pub mod search;
pub mod sort;

pub use action::{Action, ActionKind, Mutation};
pub use config::InventoryConfig;
pub use import::Importer;
pub use inventory::{ImportSummary, Inventory, StockChange};
pub use search::{ByCode, ByName, SearchBy, SearchStrategy};
pub use sort::SortOrder;
