//! The interactive menu loop.
//!
//! [`MenuController`] owns the [`InventorySystem`] and drives it from any
//! line-oriented reader, writing the transcript to any writer. The binary
//! hands it stdin and stdout; tests hand it a `Cursor` and a `Vec<u8>`.

use std::io::{self, BufRead, Write};

use stockroom_core::{ProductUpdate, Role};
use stockroom_inventory::{InventoryError, InventorySystem};
use thiserror::Error;

use crate::input::{self, InputError};
use crate::menu::{self, MenuCommand, MenuState};

pub const WELCOME: &str = "Welcome to the Inventory Management System!";
pub const GOODBYE: &str = "Exiting program. Goodbye!";

/// Anything that can interrupt a single command.
#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Input(InputError::Io(err))
    }
}

/// Drives an [`InventorySystem`] through the role menus.
pub struct MenuController<R, W> {
    system: InventorySystem,
    input: R,
    output: W,
    state: MenuState,
}

impl<R: BufRead, W: Write> MenuController<R, W> {
    /// Starts in the menu of the system's active session, or at the login
    /// prompt when there is none.
    pub fn new(system: InventorySystem, input: R, output: W) -> Self {
        let state = system
            .current_session()
            .map(|session| MenuState::for_role(session.role))
            .unwrap_or(MenuState::Unauthenticated);

        Self {
            system,
            input,
            output,
            state,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn system(&self) -> &InventorySystem {
        &self.system
    }

    /// Consume the controller, returning the system and the output sink.
    pub fn into_parts(self) -> (InventorySystem, W) {
        (self.system, self.output)
    }

    /// Run until Exit is chosen or the input is closed.
    ///
    /// Only I/O failures on the underlying streams are returned; every other
    /// error is reported in the transcript and the loop re-prompts.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", WELCOME)?;
        while !self.state.is_terminated() {
            self.state = self.step()?;
        }
        writeln!(self.output, "{}", GOODBYE)?;
        self.output.flush()
    }

    /// Run one prompt cycle of the current state and return the next state.
    pub fn step(&mut self) -> io::Result<MenuState> {
        let outcome = match self.state {
            MenuState::Terminated => return Ok(MenuState::Terminated),
            MenuState::Unauthenticated => self.login_step(),
            state => match state.role() {
                Some(role) => self.menu_step(role),
                None => return Ok(state),
            },
        };

        match outcome {
            Ok(next) => {
                if next != self.state {
                    tracing::debug!(from = ?self.state, to = ?next, "Menu transition");
                }
                Ok(next)
            }
            Err(CommandError::Input(InputError::Eof)) => {
                tracing::debug!("Input closed");
                Ok(MenuState::Terminated)
            }
            Err(CommandError::Input(InputError::Io(err))) => Err(err),
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                Ok(self.state)
            }
        }
    }

    fn login_step(&mut self) -> Result<MenuState, CommandError> {
        let username = self.prompt("Username: ")?;
        let password = self.prompt("Password: ")?;

        let session = self.system.login(&username, &password)?;
        let next = MenuState::for_role(session.role);
        writeln!(
            self.output,
            "Logged in as {} ({})",
            session.username, session.role
        )?;
        Ok(next)
    }

    fn menu_step(&mut self, role: Role) -> Result<MenuState, CommandError> {
        writeln!(self.output, "\n{}", menu::render(role))?;
        let choice = self.prompt("Choose an option: ")?;
        let command = menu::parse_choice(role, &choice)?;

        self.execute(command)?;
        Ok(self.state.after(command))
    }

    fn execute(&mut self, command: MenuCommand) -> Result<(), CommandError> {
        match command {
            MenuCommand::Exit => Ok(()),
            MenuCommand::AddProduct => self.add_product(),
            MenuCommand::UpdateProduct => self.update_product(),
            MenuCommand::DeleteProduct => self.delete_product(),
            MenuCommand::ViewInventory => self.view_inventory(),
            MenuCommand::SearchProduct => self.search_product(),
            MenuCommand::AdjustStock => self.adjust_stock(),
            MenuCommand::ViewWorkers => self.view_workers(),
            MenuCommand::AddWorker => self.add_worker(),
            MenuCommand::Logout => {
                self.system.logout();
                writeln!(self.output, "Logged out successfully.")?;
                Ok(())
            }
        }
    }

    fn add_product(&mut self) -> Result<(), CommandError> {
        let product_id = self.prompt("Product ID: ")?;
        let name = self.prompt("Name: ")?;
        let category = self.prompt("Category: ")?;
        let price = input::parse_price(&self.prompt("Price: ")?)?;
        let stock_quantity = input::parse_quantity(&self.prompt("Stock Quantity: ")?)?;

        self.system
            .add_product(&product_id, &name, &category, price, stock_quantity)?;
        writeln!(self.output, "Product added successfully.")?;
        Ok(())
    }

    fn update_product(&mut self) -> Result<(), CommandError> {
        let product_id = self.prompt("Product ID to update: ")?;
        let mut update = ProductUpdate::new();

        loop {
            let raw = self.prompt("Field to update (name, category, price, stock_quantity) or 'done': ")?;
            let field = match input::parse_field(&raw) {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    continue;
                }
            };

            let value = self.prompt(&format!("New value for {}: ", field))?;
            if let Err(err) = input::set_field(&mut update, field, &value) {
                writeln!(self.output, "{}", err)?;
            }
        }

        self.system.update_product(&product_id, &update)?;
        writeln!(self.output, "Product updated successfully.")?;
        Ok(())
    }

    fn delete_product(&mut self) -> Result<(), CommandError> {
        let product_id = self.prompt("Product ID to delete: ")?;
        self.system.delete_product(&product_id)?;
        writeln!(self.output, "Product deleted successfully.")?;
        Ok(())
    }

    fn view_inventory(&mut self) -> Result<(), CommandError> {
        let mut entries = self.system.view_inventory()?.peekable();
        if entries.peek().is_none() {
            writeln!(self.output, "No products in inventory.")?;
            return Ok(());
        }

        writeln!(self.output, "\nInventory List:")?;
        for entry in entries {
            writeln!(self.output, "{}", entry.product)?;
            if entry.low_stock {
                writeln!(self.output, "Warning: Low stock")?;
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn search_product(&mut self) -> Result<(), CommandError> {
        let keyword = self.prompt("Enter product name or category to search: ")?;
        let results = self.system.search_product(&keyword)?;

        if results.is_empty() {
            writeln!(self.output, "No products found matching the search criteria.")?;
            return Ok(());
        }

        writeln!(self.output, "\nSearch Results:")?;
        for product in results {
            writeln!(self.output, "{}", product)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn adjust_stock(&mut self) -> Result<(), CommandError> {
        let product_id = self.prompt("Product ID to adjust stock: ")?;
        let delta = input::parse_delta(&self.prompt("Enter quantity to add or subtract: ")?)?;

        let change = self.system.adjust_stock(&product_id, delta)?;
        writeln!(
            self.output,
            "Stock updated. New quantity of '{}' is {}",
            change.product_name, change.new_quantity
        )?;
        Ok(())
    }

    fn view_workers(&mut self) -> Result<(), CommandError> {
        let report = self.system.view_workers()?;
        if report.workers.is_empty() {
            writeln!(self.output, "No workers registered.")?;
            return Ok(());
        }

        writeln!(self.output, "\nWorkers List:")?;
        for worker in &report.workers {
            writeln!(
                self.output,
                "Username: {}, Role: {}",
                worker.username, worker.role
            )?;
        }

        if !report.adjustments.is_empty() {
            writeln!(self.output, "\nStock Adjustments by Workers:")?;
            for adjustment in &report.adjustments {
                writeln!(self.output, "{}", adjustment.to_log_line())?;
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn add_worker(&mut self) -> Result<(), CommandError> {
        let username = self.prompt("Enter new worker's username: ")?;
        let password = self.prompt("Enter new worker's password: ")?;

        self.system.add_worker(&username, &password)?;
        writeln!(self.output, "Worker added successfully.")?;
        Ok(())
    }

    /// Print `label`, then read one line with its line ending stripped.
    fn prompt(&mut self, label: &str) -> Result<String, InputError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Eof);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use stockroom_core::AppConfig;

    fn controller(script: &str) -> MenuController<Cursor<Vec<u8>>, Vec<u8>> {
        let system = InventorySystem::from_config(&AppConfig::default()).unwrap();
        MenuController::new(system, Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(controller: MenuController<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        let (_, output) = controller.into_parts();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_starts_unauthenticated() {
        let controller = controller("");
        assert_eq!(controller.state(), MenuState::Unauthenticated);
    }

    #[test]
    fn test_starts_in_menu_of_existing_session() {
        let mut system = InventorySystem::from_config(&AppConfig::default()).unwrap();
        system.login("worker1", "workerpass").unwrap();
        let controller = MenuController::new(system, Cursor::new(Vec::new()), Vec::new());
        assert_eq!(controller.state(), MenuState::WorkerMenu);
    }

    #[test]
    fn test_login_step_transitions_to_role_menu() {
        let mut controller = controller("user\nuserpass\n");
        let next = controller.step().unwrap();
        assert_eq!(next, MenuState::UserMenu);
        assert!(transcript(controller).ends_with("Logged in as user (User)\n"));
    }

    #[test]
    fn test_failed_login_stays_unauthenticated() {
        let mut controller = controller("admin\nnope\n");
        assert_eq!(controller.step().unwrap(), MenuState::Unauthenticated);
        assert!(transcript(controller).contains("Invalid username or password."));
    }

    #[test]
    fn test_eof_terminates() {
        let mut controller = controller("admin\n");
        assert_eq!(controller.step().unwrap(), MenuState::Terminated);
    }

    #[test]
    fn test_prompt_strips_line_endings() {
        let mut controller = controller("  spaced value \r\n");
        assert_eq!(controller.prompt("> ").unwrap(), "  spaced value ");
    }

    #[test]
    fn test_invalid_choice_stays_in_menu() {
        let mut controller = controller("admin\npassword123\n42\n");
        controller.state = controller.step().unwrap();
        assert_eq!(controller.step().unwrap(), MenuState::AdminMenu);
        assert!(transcript(controller).contains("Invalid choice. Please try again."));
    }

    #[test]
    fn test_run_prints_banners() {
        let mut controller = controller("admin\npassword123\n0\n");
        controller.run().unwrap();
        assert!(controller.state().is_terminated());

        let out = transcript(controller);
        assert!(out.starts_with(WELCOME));
        assert!(out.ends_with(&format!("{}\n", GOODBYE)));
    }
}
