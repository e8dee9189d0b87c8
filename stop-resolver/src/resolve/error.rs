//! Resolution error types.

/// Errors from catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No stop in the catalog carries this name
    #[error("no stop named {name:?} in the catalog")]
    StopNotFound { name: String },
}
