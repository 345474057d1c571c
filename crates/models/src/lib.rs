//! Schema mirror of the `org.loan_service_v4` business-network model.
//!
//! These types carry no behavior beyond field declarations, wire-shape
//! serialization and the base-category traits in [`system`]; the ledger
//! owns all semantics. All non-discriminator fields are optional on read so
//! partial server responses normalize to `None` instead of failing to
//! decode.

pub mod errors;
pub mod system;

pub mod bank;
pub mod customer;
pub mod loan_request;
pub mod offer;

pub use bank::{Bank, BankUpdate};
pub use customer::{Admin, Customer};
pub use loan_request::{LoanRequest, LoanRequestUpdate, RequestState};
pub use offer::Offer;
