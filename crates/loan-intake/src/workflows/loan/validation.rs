use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use super::domain::{LoanApplication, LoanApplicationForm};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";
const PHONE_PATTERN: &str = r"^\+7[0-9]{10}$";

/// Largest accepted salary or obligation, 10^15. Keeps the offer arithmetic within `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Which amount field failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Salary,
    OtherLoans,
}

impl AmountField {
    pub const fn label(self) -> &'static str {
        match self {
            AmountField::Salary => "salary",
            AmountField::OtherLoans => "other_loans",
        }
    }
}

/// Raised by [`parse_amount`] for text that is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a decimal number")]
pub struct ParseError {
    pub input: String,
}

/// Inline form errors. The display text is what the applicant sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error(
        "Please enter a valid phone number in the format +7XXXXXXXXXX (10 digits after the country code)."
    )]
    InvalidPhone,
    #[error("Please enter a birth date between 1900-01-01 and today.")]
    BirthDateOutOfRange { birth_date: NaiveDate },
    #[error("Please enter valid numeric values for salary and payments on other loans.")]
    InvalidAmount { field: AmountField, source: ParseError },
    #[error("Salary and payments on other loans cannot be negative.")]
    NegativeAmount { field: AmountField },
    #[error("Salary and payments on other loans cannot exceed 1000000000000000.")]
    AmountTooLarge { field: AmountField },
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"))
}

pub fn validate_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// `+7` followed by exactly ten ASCII digits and nothing else.
pub fn validate_phone(value: &str) -> bool {
    phone_regex().is_match(value)
}

/// Parse free-text money input. Surrounding whitespace is ignored and
/// scientific notation (`1e3`) is accepted alongside plain decimals.
pub fn parse_amount(value: &str) -> Result<Decimal, ParseError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ParseError {
            input: value.to_string(),
        })
}

pub fn earliest_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if birth_date < earliest_birth_date() || birth_date > today {
        return Err(ValidationError::BirthDateOutOfRange { birth_date });
    }
    Ok(())
}

fn amount(field: AmountField, raw: &str) -> Result<Decimal, ValidationError> {
    let value = parse_amount(raw).map_err(|source| ValidationError::InvalidAmount { field, source })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::NegativeAmount { field });
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge { field });
    }
    Ok(value)
}

/// Turn a raw form into a [`LoanApplication`], reporting the first failing field.
pub fn validate_form(
    form: LoanApplicationForm,
    today: NaiveDate,
) -> Result<LoanApplication, ValidationError> {
    if !validate_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !validate_phone(&form.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    validate_birth_date(form.birth_date, today)?;

    let salary = amount(AmountField::Salary, &form.salary)?;
    let other_loans = amount(AmountField::OtherLoans, &form.other_loans)?;

    Ok(LoanApplication {
        name: form.name,
        birth_date: form.birth_date,
        email: form.email,
        phone: form.phone,
        job_status: form.job_status,
        salary,
        other_loans,
    })
}
