//! Audit storage backends.

use std::io::{self, Write};

use stockroom_core::AuditConfig;

use crate::error::AuditError;
use crate::event::StockAdjustment;
use crate::logger::AuditFilter;

/// Trait for audit storage backends.
pub trait AuditStorage: Send {
    /// Store an audit event.
    fn store(&mut self, event: StockAdjustment) -> Result<(), AuditError>;

    /// Query audit events with filters, in append order.
    fn query(&self, filter: &AuditFilter) -> Result<Vec<StockAdjustment>, AuditError>;

    /// Count events matching a filter (ignores limit).
    fn count(&self, filter: &AuditFilter) -> Result<usize, AuditError>;
}

/// Create a storage backend based on configuration.
pub fn create_storage(config: &AuditConfig) -> Box<dyn AuditStorage> {
    if config.console {
        Box::new(DualStorage::new(ConsoleStorage::stderr()))
    } else {
        Box::new(MemoryStorage::new())
    }
}

/// In-memory storage. The only queryable backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    events: Vec<StockAdjustment>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditStorage for MemoryStorage {
    fn store(&mut self, event: StockAdjustment) -> Result<(), AuditError> {
        self.events.push(event);
        Ok(())
    }

    fn query(&self, filter: &AuditFilter) -> Result<Vec<StockAdjustment>, AuditError> {
        let matching = self.events.iter().filter(|e| filter.matches(e)).cloned();

        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    fn count(&self, filter: &AuditFilter) -> Result<usize, AuditError> {
        Ok(self.events.iter().filter(|e| filter.matches(e)).count())
    }
}

/// Console storage (one JSON object per line).
pub struct ConsoleStorage<W> {
    writer: W,
}

impl ConsoleStorage<io::Stderr> {
    /// Console storage writing to stderr, keeping stdout free for the menu.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleStorage<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the storage and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> AuditStorage for ConsoleStorage<W> {
    fn store(&mut self, event: StockAdjustment) -> Result<(), AuditError> {
        let json = serde_json::to_string(&event)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }

    fn query(&self, _filter: &AuditFilter) -> Result<Vec<StockAdjustment>, AuditError> {
        // Console storage doesn't support querying
        Ok(vec![])
    }

    fn count(&self, _filter: &AuditFilter) -> Result<usize, AuditError> {
        Ok(0)
    }
}

/// Memory storage mirrored to a console writer.
///
/// Queries are answered from memory. The console write happens first so a
/// failed mirror leaves memory untouched.
pub struct DualStorage<W> {
    memory: MemoryStorage,
    console: ConsoleStorage<W>,
}

impl<W: Write + Send> DualStorage<W> {
    pub fn new(console: ConsoleStorage<W>) -> Self {
        Self {
            memory: MemoryStorage::new(),
            console,
        }
    }
}

impl<W: Write + Send> AuditStorage for DualStorage<W> {
    fn store(&mut self, event: StockAdjustment) -> Result<(), AuditError> {
        self.console.store(event.clone())?;
        self.memory.store(event)
    }

    fn query(&self, filter: &AuditFilter) -> Result<Vec<StockAdjustment>, AuditError> {
        self.memory.query(filter)
    }

    fn count(&self, filter: &AuditFilter) -> Result<usize, AuditError> {
        self.memory.count(filter)
    }
}
