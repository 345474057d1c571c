//! Base categories of the backing business-network framework.
//!
//! Every record on the wire is tagged with a `$class` discriminator equal
//! to its fully-qualified type name, and is one of three categories:
//! participant, asset or transaction. The categories are opaque to this
//! client beyond naming and key access.

/// A named, keyed record type of the business network.
pub trait Resource {
    /// Fully-qualified schema type name, used as the `$class` tag and in
    /// `resource:` references.
    const QUALIFIED_NAME: &'static str;

    /// The record's primary key, when present in the (possibly partial)
    /// response it was decoded from.
    fn identifier(&self) -> Option<&str>;
}

/// Actors of the network (banks, customers, admins).
pub trait Participant: Resource {}

/// Ledger-tracked things of value (loan requests).
pub trait Asset: Resource {}

/// Submitted operations (offers).
pub trait Transaction: Resource {}
