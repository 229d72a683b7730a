//! Audit logging configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the stock adjustment audit log.
///
/// The log is always kept in memory; these settings only control extra output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Mirror every recorded adjustment to stderr as a JSON line.
    #[serde(default)]
    pub console: bool,
}
