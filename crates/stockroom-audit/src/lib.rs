//! # stockroom-audit
//!
//! Audit log of worker stock adjustments.
//!
//! This crate provides functionality for:
//! - Recording every stock change made by a Worker-role session
//! - Keeping events in append order, never mutated or removed
//! - Optionally mirroring events to stderr as JSON Lines
//! - Querying history by worker, product or time range
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_audit::{AuditFilter, AuditLog};
//!
//! let mut log = AuditLog::in_memory();
//! log.record_adjustment("worker1", "P1", "Widget", -2).unwrap();
//!
//! let events = log.query(&AuditFilter {
//!     worker: Some("worker1".to_string()),
//!     ..Default::default()
//! }).unwrap();
//! assert_eq!(events.len(), 1);
//! ```

pub mod error;
pub mod event;
pub mod logger;
pub mod storage;

pub use error::AuditError;
pub use event::{DATE_FORMAT, StockAdjustment};
pub use logger::{AuditFilter, AuditLog};
pub use storage::{AuditStorage, ConsoleStorage, DualStorage, MemoryStorage};
