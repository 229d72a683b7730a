//! # stockroom-inventory
//!
//! In-memory inventory management with role-gated operations.
//!
//! The whole state lives in one [`InventorySystem`] value that callers own and
//! pass around explicitly:
//!
//! | Component | Operations |
//! |-----------|------------|
//! | Session/Auth | `login`, `logout`, `add_user` (bootstrap) |
//! | Catalog | `add_product`, `update_product`, `delete_product`, `view_inventory`, `search_product`, `adjust_stock` |
//! | Workers | `add_worker`, `view_workers` |
//!
//! ```rust
//! use stockroom_core::AppConfig;
//! use stockroom_inventory::InventorySystem;
//!
//! let mut system = InventorySystem::from_config(&AppConfig::default()).unwrap();
//! system.login("admin", "password123").unwrap();
//! system.add_product("P1", "Widget", "Tools", 9.99, 10).unwrap();
//!
//! assert!(system.adjust_stock("P1", -15).is_err());
//! assert_eq!(system.adjust_stock("P1", -10).unwrap().new_quantity, 0);
//! ```

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod system;

pub use accounts::{Accounts, Registry, Session};
pub use catalog::Catalog;
pub use error::InventoryError;
pub use system::{InventoryEntry, InventorySystem, StockChange, WorkerReport};
