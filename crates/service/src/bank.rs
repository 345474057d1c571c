//! Bank participant screen: namespace-bound service and form controller.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use common::data::DataService;
use common::DataError;
use models::bank::{Bank, BankUpdate};

use crate::errors::FormError;
use crate::form::{FieldKey, FieldValue, Form};

/// Namespace under which banks are exposed by the REST server.
const NAMESPACE: &str = "Bank";

/// Pure delegation to the data service; the only contract here is binding
/// the `Bank` namespace.
pub struct BankService<D: DataService> {
    data: Arc<D>,
}

impl<D: DataService> BankService<D> {
    pub fn new(data: Arc<D>) -> Self {
        Self { data }
    }

    pub async fn get_all(&self) -> Result<Vec<Bank>, DataError> {
        self.data.get_all(NAMESPACE).await
    }

    pub async fn get_participant(&self, id: &str) -> Result<Bank, DataError> {
        self.data.get_single(NAMESPACE, id).await
    }

    pub async fn add_participant(&self, item: &Bank) -> Result<Bank, DataError> {
        self.data.add(NAMESPACE, item).await
    }

    pub async fn update_participant(&self, id: &str, item: &BankUpdate) -> Result<Bank, DataError> {
        self.data.update(NAMESPACE, id, item).await
    }

    pub async fn delete_participant(&self, id: &str) -> Result<Value, DataError> {
        self.data.delete(NAMESPACE, id).await
    }
}

/// Form fields of the bank screen; all required.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BankField {
    MinCommitment,
    MaxCommitment,
    Id,
}

impl FieldKey for BankField {
    const ALL: &'static [Self] = &[Self::MinCommitment, Self::MaxCommitment, Self::Id];

    fn name(self) -> &'static str {
        match self {
            Self::MinCommitment => "minCommitment",
            Self::MaxCommitment => "maxCommitment",
            Self::Id => "id",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::MinCommitment => 0,
            Self::MaxCommitment => 1,
            Self::Id => 2,
        }
    }
}

/// Owns the bank form, the cached participant list and the current error.
///
/// Every operation both returns its outcome to the caller and records the
/// user-facing message in the error field so a view can render the last
/// result. The cached list is refreshed only by an explicit
/// [`BankController::load_all`]; a failed load leaves stale data in place.
pub struct BankController<D: DataService> {
    service: BankService<D>,
    form: Form<BankField>,
    all_participants: Vec<Bank>,
    current_id: Option<String>,
    error_message: Option<String>,
}

impl<D: DataService> BankController<D> {
    pub fn new(service: BankService<D>) -> Self {
        Self {
            service,
            form: Form::new(),
            all_participants: Vec::new(),
            current_id: None,
            error_message: None,
        }
    }

    /// Explicit initialization: perform the initial list load.
    pub async fn init(&mut self) -> Result<(), FormError> {
        self.load_all().await
    }

    /// Fetch every bank. On success the cached list is replaced and the
    /// error cleared; on failure the previous list stays untouched.
    pub async fn load_all(&mut self) -> Result<(), FormError> {
        match self.service.get_all().await {
            Ok(result) => {
                self.error_message = None;
                debug!(count = result.len(), "loaded banks");
                self.all_participants = result;
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    /// Create a bank from current form values. The form clears before the
    /// remote call resolves and again after success; the cached list is not
    /// updated, callers reload to see the new record.
    pub async fn add_participant(&mut self) -> Result<(), FormError> {
        let participant = match self.participant_from_form() {
            Ok(participant) => participant,
            Err(err) => return Err(self.record_error(err)),
        };
        self.form.reset();
        match self.service.add_participant(&participant).await {
            Ok(_) => {
                self.error_message = None;
                self.form.reset();
                info!(id = participant.id.as_deref().unwrap_or_default(), "bank added");
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    /// Update the bank whose key sits in the form's id field. The payload
    /// omits the key; identity travels in the request path. Neither the
    /// cached list nor the form is touched afterward.
    pub async fn update_participant(&mut self) -> Result<(), FormError> {
        let key = self.form.text(BankField::Id).unwrap_or_default().to_string();
        let payload = match self.update_from_form() {
            Ok(payload) => payload,
            Err(err) => return Err(self.record_error(err)),
        };
        match self.service.update_participant(&key, &payload).await {
            Ok(_) => {
                self.error_message = None;
                info!(id = %key, "bank updated");
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    /// Delete the bank selected earlier via [`BankController::set_current_id`].
    /// Deletion is two-phase because the trigger itself carries no
    /// parameter; with no selection the request goes out with an empty id
    /// and fails however the server fails it.
    pub async fn delete_participant(&mut self) -> Result<(), FormError> {
        let id = self.current_id.clone().unwrap_or_default();
        match self.service.delete_participant(&id).await {
            Ok(_) => {
                self.error_message = None;
                info!(id = %id, "bank deleted");
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    pub fn set_current_id(&mut self, id: impl Into<String>) {
        self.current_id = Some(id.into());
    }

    /// Fetch one bank and populate the form field-by-field; fields absent
    /// from the response come back empty.
    pub async fn load_form(&mut self, id: &str) -> Result<(), FormError> {
        match self.service.get_participant(id).await {
            Ok(result) => {
                self.error_message = None;
                self.form.set(
                    BankField::MinCommitment,
                    result.min_commitment.map(FieldValue::Number),
                );
                self.form.set(
                    BankField::MaxCommitment,
                    result.max_commitment.map(FieldValue::Number),
                );
                self.form.set(BankField::Id, result.id.map(FieldValue::Text));
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    pub fn toggle_array_value(&mut self, field: BankField, value: &str) {
        self.form.toggle_array_value(field, value);
    }

    pub fn has_array_value(&self, field: BankField, value: &str) -> bool {
        self.form.has_array_value(field, value)
    }

    pub fn participants(&self) -> &[Bank] {
        &self.all_participants
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn form(&self) -> &Form<BankField> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form<BankField> {
        &mut self.form
    }

    fn participant_from_form(&self) -> Result<Bank, FormError> {
        Ok(Bank::new(
            self.form.text(BankField::Id).map(str::to_string),
            self.form.number(BankField::MinCommitment)?,
            self.form.number(BankField::MaxCommitment)?,
        ))
    }

    fn update_from_form(&self) -> Result<BankUpdate, FormError> {
        Ok(BankUpdate::new(
            self.form.number(BankField::MinCommitment)?,
            self.form.number(BankField::MaxCommitment)?,
        ))
    }

    /// Overwrite the current error; the previous one is never accumulated.
    fn record_error(&mut self, err: FormError) -> FormError {
        self.error_message = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::data::mock::MemoryDataService;
    use serde_json::json;

    fn controller() -> (Arc<MemoryDataService>, BankController<MemoryDataService>) {
        let data = Arc::new(MemoryDataService::new());
        let controller = BankController::new(BankService::new(Arc::clone(&data)));
        (data, controller)
    }

    #[tokio::test]
    async fn load_all_caches_list_and_clears_error() {
        let (data, mut controller) = controller();
        data.insert_raw(
            "Bank",
            "B1",
            json!({"$class": "org.loan_service_v4.Bank", "id": "B1",
                   "minCommitment": 100.0, "maxCommitment": 500.0}),
        );

        controller.init().await.expect("load");
        assert_eq!(controller.participants().len(), 1);
        let bank = &controller.participants()[0];
        assert_eq!(bank.id.as_deref(), Some("B1"));
        assert_eq!(bank.min_commitment, Some(100.0));
        assert_eq!(bank.max_commitment, Some(500.0));
        assert_eq!(controller.error_message(), None);
    }

    #[tokio::test]
    async fn failed_load_keeps_stale_list_and_sets_message() {
        let (data, mut controller) = controller();
        data.insert_raw("Bank", "B1", json!({"id": "B1"}));
        controller.load_all().await.expect("first load");
        assert_eq!(controller.participants().len(), 1);

        data.fail_next(DataError::Server);
        let err = controller.load_all().await.expect_err("second load fails");
        assert_eq!(err, FormError::Connection);
        assert_eq!(
            controller.error_message(),
            Some("Could not connect to REST server. Please check your configuration details")
        );
        // Stale-read-on-error: the earlier list is still displayed.
        assert_eq!(controller.participants().len(), 1);
    }

    #[tokio::test]
    async fn add_clears_form_regardless_of_outcome() {
        let (data, mut controller) = controller();

        controller.form_mut().set_text(BankField::Id, "B2");
        controller.form_mut().set_number(BankField::MinCommitment, 10.0);
        controller.form_mut().set_number(BankField::MaxCommitment, 20.0);
        controller.add_participant().await.expect("add");
        assert!(controller.form().is_empty());
        assert_eq!(controller.error_message(), None);
        // Cached list is not updated until the next explicit load.
        assert!(controller.participants().is_empty());
        controller.load_all().await.expect("reload");
        assert_eq!(controller.participants().len(), 1);

        controller.form_mut().set_text(BankField::Id, "B3");
        data.fail_next(DataError::Server);
        let err = controller.add_participant().await.expect_err("add fails");
        assert_eq!(err, FormError::Connection);
        assert!(controller.form().is_empty());
        assert!(controller.error_message().is_some());
    }

    #[tokio::test]
    async fn add_sends_class_tagged_record() {
        let (data, mut controller) = controller();
        controller.form_mut().set_text(BankField::Id, "B9");
        controller.form_mut().set_text(BankField::MinCommitment, "100");
        controller.form_mut().set_text(BankField::MaxCommitment, "500");
        controller.add_participant().await.expect("add");

        let stored = data.raw("Bank", "B9").expect("stored record");
        assert_eq!(stored["$class"], "org.loan_service_v4.Bank");
        assert_eq!(stored["minCommitment"], 100.0);
        assert_eq!(stored["maxCommitment"], 500.0);
    }

    #[tokio::test]
    async fn add_rejects_unparseable_numbers() {
        let (_data, mut controller) = controller();
        controller.form_mut().set_text(BankField::Id, "B1");
        controller.form_mut().set_text(BankField::MinCommitment, "lots");
        let err = controller.add_participant().await.expect_err("validation");
        assert!(matches!(err, FormError::Validation(_)));
        // Validation happens before the optimistic clear.
        assert!(!controller.form().is_empty());
        assert!(controller.error_message().is_some());
    }

    #[tokio::test]
    async fn update_omits_primary_key_and_leaves_state_alone() {
        let (data, mut controller) = controller();
        data.insert_raw(
            "Bank",
            "B1",
            json!({"id": "B1", "minCommitment": 1.0, "maxCommitment": 2.0}),
        );
        controller.load_all().await.expect("load");

        controller.form_mut().set_text(BankField::Id, "B1");
        controller.form_mut().set_number(BankField::MinCommitment, 5.0);
        controller.form_mut().set_number(BankField::MaxCommitment, 6.0);
        controller.update_participant().await.expect("update");

        let stored = data.raw("Bank", "B1").expect("stored record");
        assert_eq!(stored["minCommitment"], 5.0);
        assert_eq!(stored["id"], "B1");
        // Form and cached list stay as they were.
        assert_eq!(controller.form().text(BankField::Id), Some("B1"));
        assert_eq!(controller.participants()[0].min_commitment, Some(1.0));
    }

    #[tokio::test]
    async fn delete_is_two_phase() {
        let (data, mut controller) = controller();
        data.insert_raw("Bank", "B1", json!({"id": "B1"}));

        controller.set_current_id("B1");
        controller.delete_participant().await.expect("delete");
        assert_eq!(data.len("Bank"), 0);
        assert_eq!(controller.error_message(), None);
    }

    #[tokio::test]
    async fn delete_without_selection_issues_empty_id() {
        let (_data, mut controller) = controller();
        // No selection still issues the request, with an empty id; the
        // not-found failure is reported like any other.
        let err = controller.delete_participant().await.expect_err("delete");
        assert_eq!(err, FormError::ApiRoute);
        assert_eq!(
            controller.error_message(),
            Some("404 - Could not find API route. Please check your available APIs.")
        );
    }

    #[tokio::test]
    async fn load_form_normalizes_missing_fields() {
        let (data, mut controller) = controller();
        // Partial response: no maxCommitment, plus an unrelated key.
        data.insert_raw(
            "Bank",
            "B1",
            json!({"id": "B1", "minCommitment": 100.0, "owner": "someone"}),
        );

        controller.load_form("B1").await.expect("load form");
        assert_eq!(
            controller.form().value(BankField::MinCommitment),
            Some(&FieldValue::Number(100.0))
        );
        assert_eq!(controller.form().value(BankField::MaxCommitment), None);
        assert_eq!(controller.form().text(BankField::Id), Some("B1"));
    }

    #[tokio::test]
    async fn remote_message_surfaces_verbatim() {
        let (data, mut controller) = controller();
        data.fail_next(DataError::Other("t-id rejected by ledger".into()));
        let err = controller.load_all().await.expect_err("load fails");
        assert_eq!(err, FormError::Remote("t-id rejected by ledger".into()));
        assert_eq!(controller.error_message(), Some("t-id rejected by ledger"));
    }
}
