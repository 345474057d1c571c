use serde::{Deserialize, Serialize};

use crate::system::{Participant, Resource};

fn customer_class_tag() -> String {
    Customer::QUALIFIED_NAME.to_string()
}

fn admin_class_tag() -> String {
    Admin::QUALIFIED_NAME.to_string()
}

/// A borrowing participant, keyed by `id`. LoanRequest records point at
/// customers through `resource:` references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "$class", default = "customer_class_tag")]
    pub class: String,
    #[serde(default)]
    pub id: Option<String>,
    // Account number keeps its snake_case wire name from the schema.
    #[serde(rename = "acc_no", default)]
    pub acc_no: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Resource for Customer {
    const QUALIFIED_NAME: &'static str = "org.loan_service_v4.Customer";

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Participant for Customer {}

/// Network administrator participant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "$class", default = "admin_class_tag")]
    pub class: String,
    #[serde(default)]
    pub id: Option<String>,
}

impl Resource for Admin {
    const QUALIFIED_NAME: &'static str = "org.loan_service_v4.Admin";

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Participant for Admin {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn acc_no_keeps_schema_wire_name() {
        let customer: Customer = serde_json::from_value(json!({
            "$class": "org.loan_service_v4.Customer",
            "id": "C1",
            "acc_no": "ACC-9",
            "firstName": "Ada"
        }))
        .expect("decode");
        assert_eq!(customer.acc_no.as_deref(), Some("ACC-9"));
        assert_eq!(customer.first_name.as_deref(), Some("Ada"));

        let value = serde_json::to_value(&customer).expect("serialize");
        assert!(value.get("acc_no").is_some());
        assert!(value.get("accNo").is_none());
    }
}
