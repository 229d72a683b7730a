//! Audit event types.
//!
//! A [`StockAdjustment`] is recorded every time a worker changes the stock of
//! a product. Events are immutable once created.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display format for event timestamps (local time).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stock adjustment made by a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustment {
    /// Unique event ID.
    pub event_id: Uuid,

    /// When the adjustment was applied.
    pub occurred_at: DateTime<Utc>,

    /// Username of the worker who made the adjustment.
    pub worker: String,

    /// Adjusted product.
    pub product_id: String,

    /// Product name at the time of the adjustment.
    pub product_name: String,

    /// Signed quantity delta.
    pub quantity: i64,
}

impl StockAdjustment {
    /// Create a new adjustment event stamped with the current time.
    pub fn new(
        worker: impl Into<String>,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            worker: worker.into(),
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
        }
    }

    /// Override the event timestamp.
    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// Timestamp rendered in local time with [`DATE_FORMAT`].
    pub fn formatted_date(&self) -> String {
        self.occurred_at
            .with_timezone(&Local)
            .format(DATE_FORMAT)
            .to_string()
    }

    /// Format the event as a human-readable line.
    ///
    /// Format: `Worker: w, Product: name (ID: id), Quantity: n, Date: ...`
    pub fn to_log_line(&self) -> String {
        format!(
            "Worker: {}, Product: {} (ID: {}), Quantity: {}, Date: {}",
            self.worker,
            self.product_name,
            self.product_id,
            self.quantity,
            self.formatted_date()
        )
    }
}
