//! The inventory system context.
//!
//! [`InventorySystem`] owns every registry, the catalog, the audit log and the
//! single active session. Each operation validates the session against the
//! role permission table before touching state, and a failed operation
//! leaves state exactly as it was.

use stockroom_audit::{AuditLog, StockAdjustment};
use stockroom_core::config::DEFAULT_LOW_STOCK_THRESHOLD;
use stockroom_core::{AppConfig, Product, ProductUpdate, Role, User};
use stockroom_policy::{AccessRequest, AccessValidator, Operation, PolicyError};

use crate::accounts::{Accounts, Session};
use crate::catalog::Catalog;
use crate::error::InventoryError;

/// A product as listed by [`InventorySystem::view_inventory`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryEntry<'a> {
    pub product: &'a Product,
    /// Stock is at or below the low-stock threshold.
    pub low_stock: bool,
}

/// Result of a successful stock adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub product_id: String,
    pub product_name: String,
    pub previous_quantity: u64,
    pub new_quantity: u64,
    /// The audit record, present only for Worker-role adjustments.
    pub audit_event: Option<StockAdjustment>,
}

/// Workers and their adjustment history, as shown to admins.
#[derive(Debug, Clone)]
pub struct WorkerReport<'a> {
    pub workers: Vec<&'a User>,
    /// Every recorded adjustment, oldest first.
    pub adjustments: Vec<StockAdjustment>,
}

/// The inventory management context.
pub struct InventorySystem {
    accounts: Accounts,
    catalog: Catalog,
    audit: AuditLog,
    session: Option<Session>,
    validator: AccessValidator,
    low_stock_threshold: u64,
}

impl Default for InventorySystem {
    fn default() -> Self {
        Self::new(AuditLog::in_memory(), DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

impl InventorySystem {
    /// Create an empty system with no accounts.
    pub fn new(audit: AuditLog, low_stock_threshold: u64) -> Self {
        Self {
            accounts: Accounts::new(),
            catalog: Catalog::new(),
            audit,
            session: None,
            validator: AccessValidator::new(),
            low_stock_threshold,
        }
    }

    /// Create a system from configuration, registering the configured accounts.
    pub fn from_config(config: &AppConfig) -> Result<Self, InventoryError> {
        let mut system = Self::new(AuditLog::new(&config.audit), config.low_stock_threshold);
        for account in &config.accounts {
            system.add_user(&account.username, &account.password, account.role)?;
        }

        tracing::info!(
            users = system.accounts.users().len(),
            workers = system.accounts.workers().len(),
            low_stock_threshold = system.low_stock_threshold,
            "Inventory system initialized"
        );
        Ok(system)
    }

    // =========================================================================
    // SESSION / AUTH
    // =========================================================================

    /// Register an account without a permission check (bootstrap path).
    ///
    /// Workers go to the worker registry, everyone else to the regular one.
    pub fn add_user(&mut self, username: &str, password: &str, role: Role) -> Result<(), InventoryError> {
        self.accounts.register(User::new(username, password, role))
    }

    /// Authenticate and make the account the active session.
    ///
    /// On failure the current session, if any, is left untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&Session, InventoryError> {
        match self.accounts.authenticate(username, password) {
            Ok(session) => {
                tracing::info!(username = %session.username, role = %session.role, "Logged in");
                Ok(self.session.insert(session))
            }
            Err(err) => {
                tracing::warn!(username = %username, "Failed login attempt");
                Err(err)
            }
        }
    }

    /// Clear the active session.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(username = %session.username, "Logged out");
        }
    }

    /// The active session, if any.
    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Validate the active session for an operation and return a copy of it.
    fn authorize(&self, operation: Operation) -> Result<Session, InventoryError> {
        let request = match &self.session {
            Some(session) => AccessRequest::new(operation, &session.username, session.role),
            None => AccessRequest::anonymous(operation),
        };
        self.validator.validate(&request)?;

        self.session
            .clone()
            .ok_or_else(|| PolicyError::not_authenticated(operation).into())
    }

    // =========================================================================
    // CATALOG
    // =========================================================================

    /// Add a product. Admin only.
    pub fn add_product(
        &mut self,
        product_id: &str,
        name: &str,
        category: &str,
        price: f64,
        stock_quantity: u64,
    ) -> Result<(), InventoryError> {
        let session = self.authorize(Operation::AddProduct)?;
        self.catalog
            .insert(Product::new(product_id, name, category, price, stock_quantity))?;

        tracing::info!(
            product_id = %product_id,
            by = %session.username,
            "Product added"
        );
        Ok(())
    }

    /// Apply a typed partial update to a product. Admin only.
    pub fn update_product(
        &mut self,
        product_id: &str,
        update: &ProductUpdate,
    ) -> Result<&Product, InventoryError> {
        let session = self.authorize(Operation::UpdateProduct)?;
        let product = self
            .catalog
            .get_mut(product_id)
            .ok_or_else(|| InventoryError::not_found(product_id))?;

        update.apply_to(product);

        tracing::info!(
            product_id = %product_id,
            fields = ?update.fields(),
            by = %session.username,
            "Product updated"
        );
        Ok(product)
    }

    /// Remove a product. Admin only.
    pub fn delete_product(&mut self, product_id: &str) -> Result<Product, InventoryError> {
        let session = self.authorize(Operation::DeleteProduct)?;
        let removed = self.catalog.remove(product_id)?;

        tracing::info!(product_id = %product_id, by = %session.username, "Product deleted");
        Ok(removed)
    }

    /// Lazily list every product in insertion order, flagging low stock.
    pub fn view_inventory(
        &self,
    ) -> Result<impl Iterator<Item = InventoryEntry<'_>> + '_, InventoryError> {
        self.authorize(Operation::ViewInventory)?;
        let threshold = self.low_stock_threshold;

        Ok(self.catalog.iter().map(move |product| InventoryEntry {
            product,
            low_stock: product.is_low_stock(threshold),
        }))
    }

    /// Case-insensitive keyword search over product names and categories.
    ///
    /// An empty result is not an error.
    pub fn search_product(&self, keyword: &str) -> Result<Vec<&Product>, InventoryError> {
        self.authorize(Operation::SearchProduct)?;
        let results: Vec<&Product> = self.catalog.search(keyword).collect();

        tracing::debug!(keyword = %keyword, matches = results.len(), "Product search");
        Ok(results)
    }

    /// Apply a signed quantity delta to a product's stock.
    ///
    /// Rejected without any change if the result would be negative. Worker
    /// adjustments are appended to the audit log before the stock changes, so
    /// a failed audit write leaves the stock untouched.
    pub fn adjust_stock(&mut self, product_id: &str, delta: i64) -> Result<StockChange, InventoryError> {
        let session = self.authorize(Operation::AdjustStock)?;
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| InventoryError::not_found(product_id))?;

        let current = product.stock_quantity;
        let product_name = product.name.clone();

        let new_quantity = match current.checked_add_signed(delta) {
            Some(quantity) => quantity,
            None if delta < 0 => {
                tracing::debug!(product_id = %product_id, current, delta, "Rejected negative stock");
                return Err(InventoryError::InvalidStockAdjustment {
                    product_id: product_id.to_string(),
                    product_name,
                    current,
                    delta,
                });
            }
            None => {
                return Err(InventoryError::StockOverflow {
                    product_id: product_id.to_string(),
                    product_name,
                    current,
                    delta,
                });
            }
        };

        let audit_event = if session.role == Role::Worker {
            Some(
                self.audit
                    .record_adjustment(&session.username, product_id, &product_name, delta)?,
            )
        } else {
            None
        };

        if let Some(product) = self.catalog.get_mut(product_id) {
            product.stock_quantity = new_quantity;
        }

        tracing::info!(
            product_id = %product_id,
            delta,
            new_quantity,
            by = %session.username,
            role = %session.role,
            "Stock adjusted"
        );

        Ok(StockChange {
            product_id: product_id.to_string(),
            product_name,
            previous_quantity: current,
            new_quantity,
            audit_event,
        })
    }

    // =========================================================================
    // WORKER MANAGEMENT
    // =========================================================================

    /// Register a new worker. Admin only.
    pub fn add_worker(&mut self, username: &str, password: &str) -> Result<(), InventoryError> {
        let session = self.authorize(Operation::AddWorker)?;
        self.accounts
            .register(User::new(username, password, Role::Worker))?;

        tracing::info!(worker = %username, by = %session.username, "Worker added");
        Ok(())
    }

    /// List workers and the full adjustment audit log. Admin only.
    pub fn view_workers(&self) -> Result<WorkerReport<'_>, InventoryError> {
        self.authorize(Operation::ViewWorkers)?;

        Ok(WorkerReport {
            workers: self.accounts.workers().iter().collect(),
            adjustments: self.audit.all()?,
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Look a product up by ID, bypassing permission checks.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.catalog.get(product_id)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn low_stock_threshold(&self) -> u64 {
        self.low_stock_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> InventorySystem {
        InventorySystem::from_config(&AppConfig::default()).unwrap()
    }

    fn as_admin() -> InventorySystem {
        let mut system = system();
        system.login("admin", "password123").unwrap();
        system
            .add_product("P1", "Widget", "Tools", 9.99, 10)
            .unwrap();
        system
    }

    #[test]
    fn test_from_config_seeds_accounts() {
        let system = system();
        assert_eq!(system.accounts().users().len(), 2);
        assert_eq!(system.accounts().workers().len(), 1);
        assert!(!system.is_authenticated());
        assert_eq!(system.low_stock_threshold(), 5);
    }

    #[test]
    fn test_login_and_logout() {
        let mut system = system();
        let session = system.login("user", "userpass").unwrap();
        assert_eq!(session.role, Role::User);
        assert!(system.is_authenticated());

        system.logout();
        assert!(system.current_session().is_none());
        // Logging out twice is harmless.
        system.logout();
    }

    #[test]
    fn test_failed_login_keeps_current_session() {
        let mut system = system();
        system.login("worker1", "workerpass").unwrap();
        assert!(matches!(
            system.login("admin", "wrong"),
            Err(InventoryError::InvalidCredentials)
        ));
        assert_eq!(system.current_session().unwrap().username, "worker1");
    }

    #[test]
    fn test_operations_require_session() {
        let mut system = system();
        assert!(matches!(
            system.view_inventory(),
            Err(InventoryError::NotAuthenticated(_))
        ));
        assert!(matches!(
            system.adjust_stock("P1", 1),
            Err(InventoryError::NotAuthenticated(_))
        ));
        assert!(matches!(
            system.add_product("P1", "Widget", "Tools", 1.0, 1),
            Err(InventoryError::NotAuthenticated(_))
        ));
    }

    #[test]
    fn test_add_product_duplicate() {
        let mut system = as_admin();
        let err = system
            .add_product("P1", "Other", "Misc", 1.0, 1)
            .unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateKey { .. }));
        assert_eq!(system.product("P1").unwrap().name, "Widget");
    }

    #[test]
    fn test_update_product() {
        let mut system = as_admin();
        let updated = system
            .update_product("P1", &ProductUpdate::new().name("Gizmo").price(3.5))
            .unwrap();
        assert_eq!(updated.name, "Gizmo");
        assert_eq!(updated.price, 3.5);
        assert_eq!(updated.stock_quantity, 10);

        assert!(matches!(
            system.update_product("P404", &ProductUpdate::new().name("x")),
            Err(InventoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_permission_checked_before_lookup() {
        let mut system = as_admin();
        system.login("user", "userpass").unwrap();
        assert!(matches!(
            system.update_product("P404", &ProductUpdate::new()),
            Err(InventoryError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_delete_product() {
        let mut system = as_admin();
        let removed = system.delete_product("P1").unwrap();
        assert_eq!(removed.product_id, "P1");
        assert!(system.product("P1").is_none());
        assert!(matches!(
            system.delete_product("P1"),
            Err(InventoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_view_inventory_flags_low_stock() {
        let mut system = as_admin();
        system
            .add_product("P2", "Nail", "Hardware", 0.1, 5)
            .unwrap();
        system
            .add_product("P3", "Bolt", "Hardware", 0.2, 6)
            .unwrap();

        let entries: Vec<(String, bool)> = system
            .view_inventory()
            .unwrap()
            .map(|e| (e.product.product_id.clone(), e.low_stock))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("P1".to_string(), false),
                ("P2".to_string(), true),
                ("P3".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_custom_threshold() {
        let config = AppConfig {
            low_stock_threshold: 10,
            ..Default::default()
        };
        let mut system = InventorySystem::from_config(&config).unwrap();
        system.login("admin", "password123").unwrap();
        system
            .add_product("P1", "Widget", "Tools", 9.99, 10)
            .unwrap();
        assert!(system.view_inventory().unwrap().all(|e| e.low_stock));
    }

    #[test]
    fn test_search_product_results_borrow_system_only() {
        let mut system = as_admin();
        system
            .add_product("P2", "Garden Hose", "Garden", 24.0, 3)
            .unwrap();

        let found = {
            let keyword = "hose".to_uppercase();
            system.search_product(&keyword).unwrap()
        };
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_id, "P2");

        system.logout();
        assert!(matches!(
            system.search_product("hose"),
            Err(InventoryError::NotAuthenticated(_))
        ));
    }

    #[test]
    fn test_adjust_stock_by_admin_is_not_audited() {
        let mut system = as_admin();
        let change = system.adjust_stock("P1", 5).unwrap();
        assert_eq!(change.previous_quantity, 10);
        assert_eq!(change.new_quantity, 15);
        assert!(change.audit_event.is_none());
        assert!(system.audit_log().is_empty().unwrap());
    }

    #[test]
    fn test_adjust_stock_by_worker_is_audited() {
        let mut system = as_admin();
        system.login("worker1", "workerpass").unwrap();

        let change = system.adjust_stock("P1", -4).unwrap();
        assert_eq!(change.new_quantity, 6);
        let event = change.audit_event.unwrap();
        assert_eq!(event.worker, "worker1");
        assert_eq!(event.product_name, "Widget");
        assert_eq!(event.quantity, -4);
        assert_eq!(system.audit_log().len().unwrap(), 1);
    }

    #[test]
    fn test_adjust_stock_rejects_negative_result() {
        let mut system = as_admin();
        system.login("worker1", "workerpass").unwrap();

        let err = system.adjust_stock("P1", -11).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InvalidStockAdjustment { current: 10, delta: -11, .. }
        ));
        assert_eq!(system.product("P1").unwrap().stock_quantity, 10);
        assert!(system.audit_log().is_empty().unwrap());
    }

    #[test]
    fn test_adjust_stock_overflow() {
        let mut system = as_admin();
        system
            .update_product("P1", &ProductUpdate::new().stock_quantity(u64::MAX))
            .unwrap();
        assert!(matches!(
            system.adjust_stock("P1", 1),
            Err(InventoryError::StockOverflow { .. })
        ));
        assert_eq!(system.product("P1").unwrap().stock_quantity, u64::MAX);
    }

    #[test]
    fn test_adjust_stock_unknown_product() {
        let mut system = as_admin();
        assert!(matches!(
            system.adjust_stock("P404", 1),
            Err(InventoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_worker_and_login() {
        let mut system = as_admin();
        system.add_worker("worker2", "pw2").unwrap();
        assert_eq!(system.accounts().workers().len(), 2);

        system.login("worker2", "pw2").unwrap();
        assert_eq!(system.current_session().unwrap().role, Role::Worker);
    }

    #[test]
    fn test_view_workers_report() {
        let mut system = as_admin();
        system.login("worker1", "workerpass").unwrap();
        system.adjust_stock("P1", 2).unwrap();
        system.adjust_stock("P1", -1).unwrap();

        assert!(matches!(
            system.view_workers(),
            Err(InventoryError::PermissionDenied(_))
        ));

        system.login("admin", "password123").unwrap();
        let report = system.view_workers().unwrap();
        assert_eq!(report.workers.len(), 1);
        assert_eq!(report.workers[0].username, "worker1");
        let deltas: Vec<i64> = report.adjustments.iter().map(|a| a.quantity).collect();
        assert_eq!(deltas, vec![2, -1]);
    }
}
