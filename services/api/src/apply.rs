use crate::infra::{parse_date, parse_job_status, ConfiguredNotifier};
use chrono::NaiveDate;
use clap::Args;
use loan_intake::config::AppConfig;
use loan_intake::error::AppError;
use loan_intake::telemetry;
use loan_intake::workflows::loan::{
    ApplicationServiceError, FlowState, JobStatus, LoanApplicationForm, LoanApplicationService,
    SqliteApplicationStore, DEFAULT_PHONE_PREFIX,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Applicant name
    #[arg(long)]
    pub(crate) name: String,
    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) birth_date: NaiveDate,
    /// Applicant email; the decision notice goes here
    #[arg(long)]
    pub(crate) email: String,
    /// Phone in the form +7XXXXXXXXXX
    #[arg(long, default_value = DEFAULT_PHONE_PREFIX)]
    pub(crate) phone: String,
    /// employed or unemployed
    #[arg(long, value_parser = parse_job_status)]
    pub(crate) job_status: JobStatus,
    /// Monthly salary
    #[arg(long)]
    pub(crate) salary: String,
    /// Monthly payments on other loans
    #[arg(long)]
    pub(crate) other_loans: String,
    /// Override the configured database path
    #[arg(long)]
    pub(crate) database: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct InitDbArgs {
    /// Override the configured database path
    #[arg(long)]
    pub(crate) database: Option<PathBuf>,
}

pub(crate) fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let database = args
        .database
        .clone()
        .unwrap_or_else(|| config.storage.database_path.clone());
    let store = Arc::new(SqliteApplicationStore::open(&database)?);
    let notifier = Arc::new(ConfiguredNotifier::from_config(config.mail.as_ref())?);
    let service = LoanApplicationService::new(store, notifier);

    let result = match service.submit(form_from_args(args)) {
        Err(ApplicationServiceError::Store(err)) => return Err(err.into()),
        other => other,
    };

    render_page(&FlowState::start().submitted(result));
    Ok(())
}

pub(crate) fn run_init_db(args: InitDbArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let database = args.database.unwrap_or(config.storage.database_path);
    SqliteApplicationStore::open(&database)?;
    println!("Application database ready at {}", database.display());
    Ok(())
}

fn form_from_args(args: ApplyArgs) -> LoanApplicationForm {
    LoanApplicationForm {
        name: args.name,
        birth_date: args.birth_date,
        email: args.email,
        phone: args.phone,
        job_status: args.job_status,
        salary: args.salary,
        other_loans: args.other_loans,
    }
}

fn render_page(state: &FlowState) {
    match state {
        FlowState::Result(page) => {
            println!("Loan application result (#{})", page.application_id);
            println!("{}", "=".repeat(40));
            for line in page.lines() {
                println!("{line}");
            }
        }
        FlowState::Intake(page) => {
            if let Some(error) = &page.error {
                eprintln!("{error}");
            }
        }
    }
}
