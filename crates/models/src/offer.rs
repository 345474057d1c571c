use serde::{Deserialize, Serialize};

use crate::system::{Resource, Transaction};

fn class_tag() -> String {
    Offer::QUALIFIED_NAME.to_string()
}

/// A funding offer submitted against a loan request. `request` is a
/// `resource:` reference to the LoanRequest asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "$class", default = "class_tag")]
    pub class: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub request: Option<String>,
}

impl Resource for Offer {
    const QUALIFIED_NAME: &'static str = "org.loan_service_v4.Offer";

    fn identifier(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }
}

impl Transaction for Offer {}
