//! Entity services and form controllers on top of the generic data access.
//! - Services bind an entity-type namespace and delegate, nothing more.
//! - Controllers own form state, the cached record list and the current
//!   error, and drive every create/read/update/delete screen the same way.
//! - Provides clear error types carrying the user-facing messages.

pub mod errors;
pub mod form;

pub mod bank;
pub mod loan_request;
