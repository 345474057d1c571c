use serde::{Deserialize, Serialize};

use crate::system::{Participant, Resource};

fn class_tag() -> String {
    Bank::QUALIFIED_NAME.to_string()
}

/// A lending participant, keyed by `id`, with the commitment band it is
/// willing to fund.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    #[serde(rename = "$class", default = "class_tag")]
    pub class: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub min_commitment: Option<f64>,
    #[serde(default)]
    pub max_commitment: Option<f64>,
}

impl Bank {
    pub fn new(id: Option<String>, min_commitment: Option<f64>, max_commitment: Option<f64>) -> Self {
        Self {
            class: class_tag(),
            id,
            min_commitment,
            max_commitment,
        }
    }
}

impl Resource for Bank {
    const QUALIFIED_NAME: &'static str = "org.loan_service_v4.Bank";

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Participant for Bank {}

/// Update payload. The primary key is deliberately absent; the server takes
/// identity from the request path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankUpdate {
    #[serde(rename = "$class")]
    pub class: String,
    pub min_commitment: Option<f64>,
    pub max_commitment: Option<f64>,
}

impl BankUpdate {
    pub fn new(min_commitment: Option<f64>, max_commitment: Option<f64>) -> Self {
        Self {
            class: class_tag(),
            min_commitment,
            max_commitment,
        }
    }
}
