//! Error types for the state machine engine

use thiserror::Error;

use crate::hsm::MAX_NESTING;

/// Result type alias for state machine operations
pub type HsmResult<T> = std::result::Result<T, HsmError>;

/// Errors that can occur during state machine operations
#[derive(Error, Debug)]
pub enum HsmError {
    /// A parent chain failed to terminate within [`MAX_NESTING`] hops,
    /// which means a handler hierarchy contains a cycle
    #[error("state hierarchy exceeds {} levels, parent chain looks cyclic", MAX_NESTING)]
    HierarchyTooDeep,

    /// A parent chain terminated at a state other than the machine's top
    /// state; the handler is not part of this machine's hierarchy
    #[error("state does not belong to this machine's hierarchy")]
    NotInHierarchy,

    /// The deep history table has no free slot for a new ancestor
    #[cfg(feature = "deep-history")]
    #[cfg_attr(docsrs, doc(cfg(feature = "deep-history")))]
    #[error("deep history table full")]
    HistoryFull,

    /// Generic error type for custom errors raised by state handlers
    #[error("Custom error: {0}")]
    Custom(String),
}
