use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::system::{Asset, Resource};

fn class_tag() -> String {
    LoanRequest::QUALIFIED_NAME.to_string()
}

/// Lifecycle state of a loan request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestState {
    Approved,
    Pending,
    Rejected,
}

impl RequestState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestState {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "APPROVED" => Ok(Self::Approved),
            "PENDING" => Ok(Self::Pending),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(ModelError::Validation(format!(
                "unknown request state: {other}"
            ))),
        }
    }
}

/// A loan application asset, keyed by `reqId`. `loanee` is a `resource:`
/// reference to the applying Customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    #[serde(rename = "$class", default = "class_tag")]
    pub class: String,
    #[serde(default)]
    pub req_id: Option<String>,
    #[serde(default)]
    pub loanee: Option<String>,
    #[serde(default)]
    pub loan_amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<RequestState>,
    #[serde(default)]
    pub loan_offers_rec: Option<String>,
}

impl LoanRequest {
    pub fn new(
        req_id: Option<String>,
        loanee: Option<String>,
        loan_amount: Option<f64>,
        description: Option<String>,
        state: Option<RequestState>,
        loan_offers_rec: Option<String>,
    ) -> Self {
        Self {
            class: class_tag(),
            req_id,
            loanee,
            loan_amount,
            description,
            state,
            loan_offers_rec,
        }
    }
}

impl Resource for LoanRequest {
    const QUALIFIED_NAME: &'static str = "org.loan_service_v4.LoanRequest";

    fn identifier(&self) -> Option<&str> {
        self.req_id.as_deref()
    }
}

impl Asset for LoanRequest {}

/// Update payload; `reqId` is deliberately absent, identity comes from the
/// request path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequestUpdate {
    #[serde(rename = "$class")]
    pub class: String,
    pub loanee: Option<String>,
    pub loan_amount: Option<f64>,
    pub description: Option<String>,
    pub state: Option<RequestState>,
    pub loan_offers_rec: Option<String>,
}

impl LoanRequestUpdate {
    pub fn new(
        loanee: Option<String>,
        loan_amount: Option<f64>,
        description: Option<String>,
        state: Option<RequestState>,
        loan_offers_rec: Option<String>,
    ) -> Self {
        Self {
            class: class_tag(),
            loanee,
            loan_amount,
            description,
            state,
            loan_offers_rec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn states_use_screaming_wire_names() {
        assert_eq!(
            serde_json::to_value(RequestState::Approved).expect("serialize"),
            json!("APPROVED")
        );
        assert_eq!(
            serde_json::from_value::<RequestState>(json!("REJECTED")).expect("decode"),
            RequestState::Rejected
        );
        assert_eq!("pending".parse::<RequestState>(), Ok(RequestState::Pending));
        assert!("OPEN".parse::<RequestState>().is_err());
    }

    #[test]
    fn wire_shape_is_class_tagged_camel_case() {
        let request = LoanRequest::new(
            Some("R1".into()),
            Some("resource:org.loan_service_v4.Customer#C1".into()),
            Some(2500.0),
            Some("bridge loan".into()),
            Some(RequestState::Pending),
            Some("none".into()),
        );
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["$class"], "org.loan_service_v4.LoanRequest");
        assert_eq!(value["reqId"], "R1");
        assert_eq!(value["loanAmount"], 2500.0);
        assert_eq!(value["state"], "PENDING");
        assert_eq!(value["loanOffersRec"], "none");
    }

    #[test]
    fn update_payload_omits_primary_key() {
        let value = serde_json::to_value(LoanRequestUpdate::new(
            None,
            Some(1.0),
            None,
            Some(RequestState::Approved),
            None,
        ))
        .expect("serialize");
        assert!(value.get("reqId").is_none());
    }
}
