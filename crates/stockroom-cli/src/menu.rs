//! Menu states and the numbered command menus of each role.

use std::fmt;

use stockroom_core::Role;

use crate::input::InputError;

/// State of the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// No session; the next step prompts for credentials.
    Unauthenticated,
    AdminMenu,
    WorkerMenu,
    UserMenu,
    /// The loop has ended.
    Terminated,
}

impl MenuState {
    /// The menu state a freshly logged-in role lands in.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => MenuState::AdminMenu,
            Role::Worker => MenuState::WorkerMenu,
            Role::User => MenuState::UserMenu,
        }
    }

    /// The role whose menu this state shows.
    pub fn role(&self) -> Option<Role> {
        match self {
            MenuState::AdminMenu => Some(Role::Admin),
            MenuState::WorkerMenu => Some(Role::Worker),
            MenuState::UserMenu => Some(Role::User),
            MenuState::Unauthenticated | MenuState::Terminated => None,
        }
    }

    /// State after running `command` from this state.
    ///
    /// Only `Exit` and `Logout` leave a menu; every other command returns to
    /// the same menu whether it succeeded or not.
    pub fn after(self, command: MenuCommand) -> Self {
        match command {
            MenuCommand::Exit => MenuState::Terminated,
            MenuCommand::Logout => MenuState::Unauthenticated,
            _ => self,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, MenuState::Terminated)
    }
}

/// A command selectable from a role menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Exit,
    AddProduct,
    UpdateProduct,
    DeleteProduct,
    ViewInventory,
    SearchProduct,
    AdjustStock,
    ViewWorkers,
    AddWorker,
    Logout,
}

impl MenuCommand {
    pub fn label(&self) -> &'static str {
        match self {
            MenuCommand::Exit => "Exit",
            MenuCommand::AddProduct => "Add Product",
            MenuCommand::UpdateProduct => "Update Product",
            MenuCommand::DeleteProduct => "Delete Product",
            MenuCommand::ViewInventory => "View Inventory",
            MenuCommand::SearchProduct => "Search Product",
            MenuCommand::AdjustStock => "Adjust Stock",
            MenuCommand::ViewWorkers => "View Workers",
            MenuCommand::AddWorker => "Add Worker",
            MenuCommand::Logout => "Logout",
        }
    }
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const ADMIN_MENU: &[MenuCommand] = &[
    MenuCommand::Exit,
    MenuCommand::AddProduct,
    MenuCommand::UpdateProduct,
    MenuCommand::DeleteProduct,
    MenuCommand::ViewInventory,
    MenuCommand::SearchProduct,
    MenuCommand::AdjustStock,
    MenuCommand::ViewWorkers,
    MenuCommand::AddWorker,
    MenuCommand::Logout,
];

const WORKER_MENU: &[MenuCommand] = &[
    MenuCommand::Exit,
    MenuCommand::ViewInventory,
    MenuCommand::AdjustStock,
    MenuCommand::Logout,
];

const USER_MENU: &[MenuCommand] = &[
    MenuCommand::Exit,
    MenuCommand::ViewInventory,
    MenuCommand::SearchProduct,
    MenuCommand::Logout,
];

/// Commands offered to `role`, indexed by their menu number.
pub fn commands_for(role: Role) -> &'static [MenuCommand] {
    match role {
        Role::Admin => ADMIN_MENU,
        Role::Worker => WORKER_MENU,
        Role::User => USER_MENU,
    }
}

/// Numbered menu text for `role`, one command per line.
pub fn render(role: Role) -> String {
    commands_for(role)
        .iter()
        .enumerate()
        .map(|(number, command)| format!("{}. {}\n", number, command))
        .collect()
}

/// Resolve a menu selection typed by `role`.
pub fn parse_choice(role: Role, raw: &str) -> Result<MenuCommand, InputError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|number| commands_for(role).get(number).copied())
        .ok_or_else(|| InputError::InvalidMenuChoice(trimmed.to_string()))
}
