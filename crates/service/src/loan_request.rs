//! LoanRequest asset screen: namespace-bound service and form controller.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use common::data::DataService;
use common::{resource, DataError};
use models::customer::Customer;
use models::loan_request::{LoanRequest, LoanRequestUpdate, RequestState};
use models::system::Resource;

use crate::errors::FormError;
use crate::form::{FieldKey, FieldValue, Form};

/// Namespace under which loan requests are exposed by the REST server.
const NAMESPACE: &str = "LoanRequest";

/// Pure delegation to the data service for the `LoanRequest` namespace.
pub struct LoanRequestService<D: DataService> {
    data: Arc<D>,
}

impl<D: DataService> LoanRequestService<D> {
    pub fn new(data: Arc<D>) -> Self {
        Self { data }
    }

    pub async fn get_all(&self) -> Result<Vec<LoanRequest>, DataError> {
        self.data.get_all(NAMESPACE).await
    }

    pub async fn get_asset(&self, id: &str) -> Result<LoanRequest, DataError> {
        self.data.get_single(NAMESPACE, id).await
    }

    pub async fn add_asset(&self, item: &LoanRequest) -> Result<LoanRequest, DataError> {
        self.data.add(NAMESPACE, item).await
    }

    pub async fn update_asset(
        &self,
        id: &str,
        item: &LoanRequestUpdate,
    ) -> Result<LoanRequest, DataError> {
        self.data.update(NAMESPACE, id, item).await
    }

    pub async fn delete_asset(&self, id: &str) -> Result<Value, DataError> {
        self.data.delete(NAMESPACE, id).await
    }
}

/// Form fields of the loan-request screen; all required. `Loanee` holds the
/// plain customer key; the `resource:` prefix is added when a payload is
/// built.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoanRequestField {
    ReqId,
    Loanee,
    LoanAmount,
    Description,
    State,
    LoanOffersRec,
}

impl FieldKey for LoanRequestField {
    const ALL: &'static [Self] = &[
        Self::ReqId,
        Self::Loanee,
        Self::LoanAmount,
        Self::Description,
        Self::State,
        Self::LoanOffersRec,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::ReqId => "reqId",
            Self::Loanee => "loanee",
            Self::LoanAmount => "loanAmount",
            Self::Description => "description",
            Self::State => "state",
            Self::LoanOffersRec => "loanOffersRec",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::ReqId => 0,
            Self::Loanee => 1,
            Self::LoanAmount => 2,
            Self::Description => 3,
            Self::State => 4,
            Self::LoanOffersRec => 5,
        }
    }
}

/// Owns the loan-request form, the cached asset list and the current
/// error. Same contract as the bank screen: the list refreshes only on an
/// explicit reload, a failed load leaves stale data in place, and a create
/// clears the form before the remote call resolves.
pub struct LoanRequestController<D: DataService> {
    service: LoanRequestService<D>,
    form: Form<LoanRequestField>,
    all_assets: Vec<LoanRequest>,
    current_id: Option<String>,
    error_message: Option<String>,
}

impl<D: DataService> LoanRequestController<D> {
    pub fn new(service: LoanRequestService<D>) -> Self {
        Self {
            service,
            form: Form::new(),
            all_assets: Vec::new(),
            current_id: None,
            error_message: None,
        }
    }

    /// Explicit initialization: perform the initial list load.
    pub async fn init(&mut self) -> Result<(), FormError> {
        self.load_all().await
    }

    pub async fn load_all(&mut self) -> Result<(), FormError> {
        match self.service.get_all().await {
            Ok(result) => {
                self.error_message = None;
                debug!(count = result.len(), "loaded loan requests");
                self.all_assets = result;
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    /// Create a loan request from current form values, pointing `loanee` at
    /// the customer via the `resource:` convention. The form clears before
    /// the remote call resolves and again after success.
    pub async fn add_asset(&mut self) -> Result<(), FormError> {
        let asset = match self.asset_from_form() {
            Ok(asset) => asset,
            Err(err) => return Err(self.record_error(err)),
        };
        self.form.reset();
        match self.service.add_asset(&asset).await {
            Ok(_) => {
                self.error_message = None;
                self.form.reset();
                info!(req_id = asset.req_id.as_deref().unwrap_or_default(), "loan request added");
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    /// Update the asset whose key sits in the form's reqId field; the
    /// payload itself omits the key.
    pub async fn update_asset(&mut self) -> Result<(), FormError> {
        let key = self
            .form
            .text(LoanRequestField::ReqId)
            .unwrap_or_default()
            .to_string();
        let payload = match self.update_from_form() {
            Ok(payload) => payload,
            Err(err) => return Err(self.record_error(err)),
        };
        match self.service.update_asset(&key, &payload).await {
            Ok(_) => {
                self.error_message = None;
                info!(req_id = %key, "loan request updated");
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    /// Delete the asset selected earlier via
    /// [`LoanRequestController::set_current_id`]; with no selection the
    /// request goes out with an empty id.
    pub async fn delete_asset(&mut self) -> Result<(), FormError> {
        let id = self.current_id.clone().unwrap_or_default();
        match self.service.delete_asset(&id).await {
            Ok(_) => {
                self.error_message = None;
                info!(req_id = %id, "loan request deleted");
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    pub fn set_current_id(&mut self, id: impl Into<String>) {
        self.current_id = Some(id.into());
    }

    /// Fetch one asset and populate the form; fields absent from the
    /// response come back empty, and the loanee reference is reduced to its
    /// key so a later submit re-applies the prefix cleanly.
    pub async fn load_form(&mut self, id: &str) -> Result<(), FormError> {
        match self.service.get_asset(id).await {
            Ok(result) => {
                self.error_message = None;
                self.form
                    .set(LoanRequestField::ReqId, result.req_id.map(FieldValue::Text));
                self.form.set(
                    LoanRequestField::Loanee,
                    result
                        .loanee
                        .map(|loanee| FieldValue::text(resource::id_part(&loanee))),
                );
                self.form.set(
                    LoanRequestField::LoanAmount,
                    result.loan_amount.map(FieldValue::Number),
                );
                self.form.set(
                    LoanRequestField::Description,
                    result.description.map(FieldValue::Text),
                );
                self.form.set(
                    LoanRequestField::State,
                    result
                        .state
                        .map(|state| FieldValue::text(state.as_str())),
                );
                self.form.set(
                    LoanRequestField::LoanOffersRec,
                    result.loan_offers_rec.map(FieldValue::Text),
                );
                Ok(())
            }
            Err(err) => Err(self.record_error(err.into())),
        }
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    pub fn toggle_array_value(&mut self, field: LoanRequestField, value: &str) {
        self.form.toggle_array_value(field, value);
    }

    pub fn has_array_value(&self, field: LoanRequestField, value: &str) -> bool {
        self.form.has_array_value(field, value)
    }

    pub fn assets(&self) -> &[LoanRequest] {
        &self.all_assets
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn form(&self) -> &Form<LoanRequestField> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form<LoanRequestField> {
        &mut self.form
    }

    fn loanee_reference(&self) -> Option<String> {
        self.form
            .text(LoanRequestField::Loanee)
            .map(|loanee| resource::reference(Customer::QUALIFIED_NAME, loanee))
    }

    fn state_from_form(&self) -> Result<Option<RequestState>, FormError> {
        match self.form.text(LoanRequestField::State) {
            None => Ok(None),
            Some(text) => Ok(Some(text.parse::<RequestState>()?)),
        }
    }

    fn asset_from_form(&self) -> Result<LoanRequest, FormError> {
        Ok(LoanRequest::new(
            self.form
                .text(LoanRequestField::ReqId)
                .map(str::to_string),
            self.loanee_reference(),
            self.form.number(LoanRequestField::LoanAmount)?,
            self.form
                .text(LoanRequestField::Description)
                .map(str::to_string),
            self.state_from_form()?,
            self.form
                .text(LoanRequestField::LoanOffersRec)
                .map(str::to_string),
        ))
    }

    fn update_from_form(&self) -> Result<LoanRequestUpdate, FormError> {
        Ok(LoanRequestUpdate::new(
            self.loanee_reference(),
            self.form.number(LoanRequestField::LoanAmount)?,
            self.form
                .text(LoanRequestField::Description)
                .map(str::to_string),
            self.state_from_form()?,
            self.form
                .text(LoanRequestField::LoanOffersRec)
                .map(str::to_string),
        ))
    }

    /// Overwrite the current error; the previous one is never accumulated.
    fn record_error(&mut self, err: FormError) -> FormError {
        self.error_message = Some(err.to_string());
        err
    }
}
