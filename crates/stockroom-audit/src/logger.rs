//! Audit log implementation.
//!
//! Provides the main `AuditLog` type, an append-only record of worker stock
//! adjustments backed by an [`AuditStorage`].

use chrono::{DateTime, Utc};
use stockroom_core::AuditConfig;

use crate::error::AuditError;
use crate::event::StockAdjustment;
use crate::storage::{AuditStorage, MemoryStorage, create_storage};

/// The append-only stock adjustment log.
pub struct AuditLog {
    storage: Box<dyn AuditStorage>,
}

impl AuditLog {
    /// Create a log with the storage selected by configuration.
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            storage: create_storage(config),
        }
    }

    /// Create a log with a custom storage backend.
    pub fn with_storage(storage: Box<dyn AuditStorage>) -> Self {
        Self { storage }
    }

    /// Create a memory-only log.
    pub fn in_memory() -> Self {
        Self::with_storage(Box::new(MemoryStorage::new()))
    }

    /// Append an event.
    pub fn record(&mut self, event: StockAdjustment) -> Result<(), AuditError> {
        tracing::debug!(
            event_id = %event.event_id,
            worker = %event.worker,
            product_id = %event.product_id,
            quantity = event.quantity,
            "Audit event"
        );

        self.storage.store(event)
    }

    /// Record an adjustment and return the stored event.
    pub fn record_adjustment(
        &mut self,
        worker: &str,
        product_id: &str,
        product_name: &str,
        quantity: i64,
    ) -> Result<StockAdjustment, AuditError> {
        let event = StockAdjustment::new(worker, product_id, product_name, quantity);
        self.record(event.clone())?;
        Ok(event)
    }

    /// Every event, in append order.
    pub fn all(&self) -> Result<Vec<StockAdjustment>, AuditError> {
        self.storage.query(&AuditFilter::default())
    }

    /// Query audit events with filters.
    pub fn query(&self, filter: &AuditFilter) -> Result<Vec<StockAdjustment>, AuditError> {
        self.storage.query(filter)
    }

    /// Count audit events matching a filter (ignores limit).
    pub fn count(&self, filter: &AuditFilter) -> Result<usize, AuditError> {
        self.storage.count(filter)
    }

    /// Number of recorded events.
    pub fn len(&self) -> Result<usize, AuditError> {
        self.count(&AuditFilter::default())
    }

    pub fn is_empty(&self) -> Result<bool, AuditError> {
        Ok(self.len()? == 0)
    }

    /// Events recorded by one worker.
    pub fn for_worker(&self, worker: &str) -> Result<Vec<StockAdjustment>, AuditError> {
        self.query(&AuditFilter {
            worker: Some(worker.to_string()),
            ..Default::default()
        })
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Filter for querying audit events.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Filter by worker username.
    pub worker: Option<String>,
    /// Filter by product ID.
    pub product_id: Option<String>,
    /// Filter by start time (inclusive).
    pub start_time: Option<DateTime<Utc>>,
    /// Filter by end time (inclusive).
    pub end_time: Option<DateTime<Utc>>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl AuditFilter {
    /// Check whether an event passes every set criterion. `limit` is not
    /// considered here.
    pub fn matches(&self, event: &StockAdjustment) -> bool {
        if let Some(ref worker) = self.worker
            && &event.worker != worker
        {
            return false;
        }
        if let Some(ref product_id) = self.product_id
            && &event.product_id != product_id
        {
            return false;
        }
        if let Some(start) = self.start_time
            && event.occurred_at < start
        {
            return false;
        }
        if let Some(end) = self.end_time
            && event.occurred_at > end
        {
            return false;
        }
        true
    }
}
