use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::common::*;
use crate::workflows::loan::validation::{
    parse_amount, validate_birth_date, validate_email, validate_form, validate_phone,
    AmountField, ValidationError, MAX_AMOUNT,
};

#[test]
fn email_accepts_mailbox_shapes() {
    for email in [
        "ivan@example.com",
        "first.last+loans@mail-server.ru",
        "a_b-c@x.y",
        "user@sub.domain.co.uk",
    ] {
        assert!(validate_email(email), "{email} should be accepted");
    }
}

#[test]
fn email_rejects_malformed_values() {
    for email in [
        "",
        "plainaddress",
        "@example.com",
        "ivan@",
        "ivan@example",
        "ivan example@mail.com",
        "ivan@exa_mple.com",
        "ivan@@example.com",
    ] {
        assert!(!validate_email(email), "{email:?} should be rejected");
    }
}

#[test]
fn phone_requires_plus_seven_and_ten_digits() {
    assert!(validate_phone("+79161234567"));

    for phone in [
        "+7",
        "+7916123456",
        "+791612345678",
        "89161234567",
        "+89161234567",
        "+7 916 123 45 67",
        "+7916123456a",
        "+79161234567\n",
        "+7٩١٦١٢٣٤٥٦٧",
    ] {
        assert!(!validate_phone(phone), "{phone:?} should be rejected");
    }
}

#[test]
fn parse_amount_accepts_decimal_text() {
    assert_eq!(parse_amount("500").unwrap(), Decimal::from(500));
    assert_eq!(parse_amount(" 1250.75 ").unwrap(), Decimal::new(125075, 2));
    assert_eq!(parse_amount("1e3").unwrap(), Decimal::from(1000));
}

#[test]
fn parse_amount_rejects_non_numbers() {
    for raw in ["", "abc", "12,5", "1.2.3", "ten"] {
        let err = parse_amount(raw).expect_err("must fail");
        assert_eq!(err.input, raw);
    }
}

#[test]
fn birth_date_is_bounded_by_1900_and_today() {
    let today = today();
    let earliest = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();

    assert!(validate_birth_date(earliest, today).is_ok());
    assert!(validate_birth_date(today, today).is_ok());
    assert!(validate_birth_date(earliest.pred_opt().unwrap(), today).is_err());
    assert!(validate_birth_date(today.succ_opt().unwrap(), today).is_err());
}

#[test]
fn form_with_text_salary_is_a_validation_error() {
    let mut form = form();
    form.salary = "abc".to_string();

    match validate_form(form, today()) {
        Err(ValidationError::InvalidAmount {
            field: AmountField::Salary,
            ..
        }) => {}
        other => panic!("expected salary parse failure, got {other:?}"),
    }
}

#[test]
fn form_reports_email_before_phone() {
    let mut form = form();
    form.email = "broken".to_string();
    form.phone = "12345".to_string();

    assert_eq!(
        validate_form(form, today()).unwrap_err(),
        ValidationError::InvalidEmail
    );
}

#[test]
fn form_rejects_negative_obligations() {
    let mut form = form();
    form.other_loans = "-10".to_string();

    assert_eq!(
        validate_form(form, today()).unwrap_err(),
        ValidationError::NegativeAmount {
            field: AmountField::OtherLoans
        }
    );
}

#[test]
fn form_rejects_amounts_above_the_cap() {
    let mut form = form();
    form.salary = "1e28".to_string();

    assert_eq!(
        validate_form(form, today()).unwrap_err(),
        ValidationError::AmountTooLarge {
            field: AmountField::Salary
        }
    );

    let mut at_cap = super::common::form();
    at_cap.salary = "1000000000000000".to_string();
    let application = validate_form(at_cap, today()).expect("cap itself is accepted");
    assert_eq!(application.salary, MAX_AMOUNT);
}

#[test]
fn valid_form_converts_amounts() {
    let application = validate_form(form(), today()).expect("valid form");
    assert_eq!(application.salary, Decimal::from(500));
    assert_eq!(application.other_loans, Decimal::from(50));
    assert_eq!(application.email, "ivan.petrov@example.com");
}

#[test]
fn inline_messages_match_the_form_copy() {
    assert_eq!(
        ValidationError::InvalidEmail.to_string(),
        "Please enter a valid email address."
    );
    assert!(ValidationError::InvalidPhone
        .to_string()
        .contains("+7XXXXXXXXXX"));
}
