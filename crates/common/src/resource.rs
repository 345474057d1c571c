//! Resource reference string convention.
//!
//! Foreign-entity pointers travel on the wire as
//! `resource:<fully-qualified-type>#<id>`. No referential-integrity
//! checking happens on this side; these helpers only format and split the
//! string.

const PREFIX: &str = "resource:";

/// Format a reference to a record of `qualified_type` with primary key `id`.
pub fn reference(qualified_type: &str, id: &str) -> String {
    format!("{PREFIX}{qualified_type}#{id}")
}

/// Split a reference into (fully-qualified type, id). Returns `None` for
/// strings that do not follow the convention.
pub fn parse(reference: &str) -> Option<(&str, &str)> {
    reference.strip_prefix(PREFIX)?.split_once('#')
}

/// The id part of a reference, or the input unchanged when it is not a
/// reference. Lets forms accept either a plain key or a full reference.
pub fn id_part(value: &str) -> &str {
    match parse(value) {
        Some((_, id)) => id,
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_and_parses() {
        let r = reference("org.loan_service_v4.Customer", "C42");
        assert_eq!(r, "resource:org.loan_service_v4.Customer#C42");
        assert_eq!(parse(&r), Some(("org.loan_service_v4.Customer", "C42")));
    }

    #[test]
    fn rejects_non_references() {
        assert_eq!(parse("C42"), None);
        assert_eq!(parse("resource:no-hash"), None);
        assert_eq!(id_part("C42"), "C42");
        assert_eq!(id_part("resource:org.loan_service_v4.Customer#C42"), "C42");
    }
}
