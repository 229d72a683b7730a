//! # stockroom-cli
//!
//! Interactive front end for [`stockroom_inventory::InventorySystem`].
//!
//! - [`input`]: parsing of prompt input into typed values
//! - [`menu`]: menu states and the numbered command menus of each role
//! - [`controller`]: the [`MenuController`] state machine
//! - [`settings`]: configuration loading for the binary

pub mod controller;
pub mod input;
pub mod menu;
pub mod settings;

pub use controller::MenuController;
pub use input::InputError;
pub use menu::{MenuCommand, MenuState};
