//! Entity screens as subcommands. Each handler populates the controller's
//! form from arguments, invokes the matching operation and renders the
//! outcome; failed operations surface the controller's user-facing message
//! through the returned error.

use std::sync::Arc;

use clap::Subcommand;

use common::data::DataService;
use common::resource;
use service::bank::{BankController, BankField, BankService};
use service::form::{FieldKey, FieldValue, Form};
use service::loan_request::{LoanRequestController, LoanRequestField, LoanRequestService};

#[derive(Subcommand)]
pub enum BankCommand {
    /// List all registered banks
    List,
    /// Fetch one bank into the edit form and print it
    Show { id: String },
    /// Register a bank
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        min_commitment: f64,
        #[arg(long)]
        max_commitment: f64,
    },
    /// Change a bank's commitment band
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        min_commitment: f64,
        #[arg(long)]
        max_commitment: f64,
    },
    /// Remove a bank
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum LoanCommand {
    /// List all loan requests
    List,
    /// Fetch one loan request into the edit form and print it
    Show { id: String },
    /// File a loan request
    Add {
        #[arg(long)]
        req_id: String,
        /// Customer key; the resource reference is derived from it
        #[arg(long)]
        loanee: String,
        #[arg(long)]
        loan_amount: f64,
        #[arg(long)]
        description: String,
        /// APPROVED, PENDING or REJECTED
        #[arg(long)]
        state: String,
        #[arg(long)]
        loan_offers_rec: String,
    },
    /// Rewrite a loan request's fields
    Update {
        #[arg(long)]
        req_id: String,
        #[arg(long)]
        loanee: String,
        #[arg(long)]
        loan_amount: f64,
        #[arg(long)]
        description: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        loan_offers_rec: String,
    },
    /// Remove a loan request
    Delete { id: String },
}

pub async fn banks<D: DataService>(command: BankCommand, data: Arc<D>) -> anyhow::Result<()> {
    let mut controller = BankController::new(BankService::new(data));
    match command {
        BankCommand::List => {
            controller.init().await?;
            if controller.participants().is_empty() {
                println!("no banks registered");
            }
            for bank in controller.participants() {
                println!(
                    "{:<12} min {:<12} max {}",
                    bank.id.as_deref().unwrap_or("-"),
                    amount(bank.min_commitment),
                    amount(bank.max_commitment),
                );
            }
        }
        BankCommand::Show { id } => {
            controller.load_form(&id).await?;
            print_form(controller.form());
        }
        BankCommand::Add {
            id,
            min_commitment,
            max_commitment,
        } => {
            let form = controller.form_mut();
            form.set_text(BankField::Id, id);
            form.set_number(BankField::MinCommitment, min_commitment);
            form.set_number(BankField::MaxCommitment, max_commitment);
            controller.add_participant().await?;
            println!("bank added");
        }
        BankCommand::Update {
            id,
            min_commitment,
            max_commitment,
        } => {
            let form = controller.form_mut();
            form.set_text(BankField::Id, id);
            form.set_number(BankField::MinCommitment, min_commitment);
            form.set_number(BankField::MaxCommitment, max_commitment);
            controller.update_participant().await?;
            println!("bank updated");
        }
        BankCommand::Delete { id } => {
            controller.set_current_id(id);
            controller.delete_participant().await?;
            println!("bank deleted");
        }
    }
    Ok(())
}

pub async fn loans<D: DataService>(command: LoanCommand, data: Arc<D>) -> anyhow::Result<()> {
    let mut controller = LoanRequestController::new(LoanRequestService::new(data));
    match command {
        LoanCommand::List => {
            controller.init().await?;
            if controller.assets().is_empty() {
                println!("no loan requests filed");
            }
            for request in controller.assets() {
                println!(
                    "{:<12} {:<12} {:<12} {}",
                    request.req_id.as_deref().unwrap_or("-"),
                    request
                        .loanee
                        .as_deref()
                        .map(resource::id_part)
                        .unwrap_or("-"),
                    amount(request.loan_amount),
                    request.state.map(|s| s.as_str()).unwrap_or("-"),
                );
            }
        }
        LoanCommand::Show { id } => {
            controller.load_form(&id).await?;
            print_form(controller.form());
        }
        LoanCommand::Add {
            req_id,
            loanee,
            loan_amount,
            description,
            state,
            loan_offers_rec,
        } => {
            let form = controller.form_mut();
            form.set_text(LoanRequestField::ReqId, req_id);
            form.set_text(LoanRequestField::Loanee, loanee);
            form.set_number(LoanRequestField::LoanAmount, loan_amount);
            form.set_text(LoanRequestField::Description, description);
            form.set_text(LoanRequestField::State, state);
            form.set_text(LoanRequestField::LoanOffersRec, loan_offers_rec);
            controller.add_asset().await?;
            println!("loan request added");
        }
        LoanCommand::Update {
            req_id,
            loanee,
            loan_amount,
            description,
            state,
            loan_offers_rec,
        } => {
            let form = controller.form_mut();
            form.set_text(LoanRequestField::ReqId, req_id);
            form.set_text(LoanRequestField::Loanee, loanee);
            form.set_number(LoanRequestField::LoanAmount, loan_amount);
            form.set_text(LoanRequestField::Description, description);
            form.set_text(LoanRequestField::State, state);
            form.set_text(LoanRequestField::LoanOffersRec, loan_offers_rec);
            controller.update_asset().await?;
            println!("loan request updated");
        }
        LoanCommand::Delete { id } => {
            controller.set_current_id(id);
            controller.delete_asset().await?;
            println!("loan request deleted");
        }
    }
    Ok(())
}

fn amount(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

fn print_form<K: FieldKey>(form: &Form<K>) {
    for key in K::ALL {
        let value = form
            .value(*key)
            .map(FieldValue::display)
            .unwrap_or_else(|| "-".into());
        println!("{:<16} {}", key.name(), value);
    }
}
