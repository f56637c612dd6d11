//! # Service Error Type
//!
//! Unified error returned by every engine operation.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  CoreError (domain rule)  ──┐                                       │
//! │                             ├──► ShopError ──► presentation layer   │
//! │  StoreError (persistence) ──┘                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//! The four distinguishable kinds callers care about: validation,
//! authorization, not-found (all under [`CoreError`]), and I/O (under
//! [`StoreError`]). Helper predicates keep caller matching terse.

use thiserror::Error;

use crema_core::{CoreError, ValidationError};
use crema_store::StoreError;

/// Error returned from storefront services.
#[derive(Debug, Error)]
pub enum ShopError {
    /// A business rule or input rejection.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence failure, propagated unchanged. The engine does not
    /// retry; the in-memory state remains authoritative.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShopError {
    /// Whether this is an input/validation rejection.
    pub fn is_validation(&self) -> bool {
        matches!(self, ShopError::Core(CoreError::Validation(_)))
    }

    /// Whether the acting user's role was insufficient.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ShopError::Core(CoreError::Unauthorized { .. }))
    }

    /// Whether a referenced entity did not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShopError::Core(CoreError::NotFound { .. }))
    }

    /// Whether persistence failed.
    pub fn is_io(&self) -> bool {
        matches!(self, ShopError::Store(_))
    }
}

impl From<ValidationError> for ShopError {
    fn from(err: ValidationError) -> Self {
        ShopError::Core(CoreError::Validation(err))
    }
}

/// Convenience type alias for Results with ShopError.
pub type ShopResult<T> = Result<T, ShopError>;
