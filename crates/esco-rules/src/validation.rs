//! Field validation for accounts, profiles and clinical entries.
//!
//! Used by the integrity zomes before an entry is accepted and by the
//! coordinators to reject bad input before anything is written.

use crate::booking::{canonical_date, canonical_time, parse_date, parse_time, BookingWindow};
use crate::role::Role;
use std::fmt;

pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_NAME_LEN: usize = 150;
pub const MAX_PHONE_LEN: usize = 15;
pub const MAX_REASON_LEN: usize = 200;
pub const MAX_SPECIALTY_LEN: usize = 100;
pub const MAX_LICENCE_LEN: usize = 50;
/// Free-text clinical fields (symptoms, treatment, prescription content)
pub const MAX_CLINICAL_TEXT_LEN: usize = 10_000;

pub const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationCode {
    Required,
    TooLong,
    Format,
    OutOfRange,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub code: ValidationCode,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

pub fn require_text(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, ValidationCode::Required, "is required"));
    }
    max_length(field, value, max_len)
}

pub fn max_length(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            ValidationCode::TooLong,
            format!("must be at most {} characters", max_len),
        ));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> ValidationResult {
    require_text("username", username, MAX_USERNAME_LEN)?;
    let ok = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !ok {
        return Err(ValidationError::new(
            "username",
            ValidationCode::Format,
            "may only contain letters, digits and @ . + - _",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> ValidationResult {
    require_text("email", email, 254)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::new("email", ValidationCode::Format, "is not a valid email address"));
    }
    Ok(())
}

/// Empty phone numbers are allowed
pub fn validate_phone(phone: &str) -> ValidationResult {
    max_length("phone", phone, MAX_PHONE_LEN)?;
    let ok = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.'));
    if !ok {
        return Err(ValidationError::new("phone", ValidationCode::Format, "may only contain digits, spaces and + - ."));
    }
    Ok(())
}

pub fn validate_date(field: &'static str, value: &str) -> ValidationResult {
    parse_date(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new(field, ValidationCode::Format, e.to_string()))
}

pub fn validate_time(field: &'static str, value: &str) -> ValidationResult {
    parse_time(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new(field, ValidationCode::Format, e.to_string()))
}

/// Stored dates must already be in `YYYY-MM-DD` form
pub fn validate_canonical_date(field: &'static str, value: &str) -> ValidationResult {
    validate_date(field, value)?;
    if canonical_date(value).ok().as_deref() != Some(value) {
        return Err(ValidationError::new(field, ValidationCode::Format, "must be written YYYY-MM-DD"));
    }
    Ok(())
}

/// Stored times must already be in zero-padded `HH:MM` form
pub fn validate_canonical_time(field: &'static str, value: &str) -> ValidationResult {
    validate_time(field, value)?;
    if canonical_time(value).ok().as_deref() != Some(value) {
        return Err(ValidationError::new(field, ValidationCode::Format, "must be written HH:MM"));
    }
    Ok(())
}

pub fn validate_reason(reason: &str) -> ValidationResult {
    require_text("reason", reason, MAX_REASON_LEN)
}

pub fn validate_blood_type(value: &str) -> ValidationResult {
    if value.is_empty() || BLOOD_TYPES.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "blood_type",
        ValidationCode::Format,
        format!("must be one of {}", BLOOD_TYPES.join(", ")),
    ))
}

/// Value in `(0, max]`, the same bounds the registration desk applies
fn in_range<T: PartialOrd + Default + fmt::Display + Copy>(
    field: &'static str,
    value: Option<T>,
    max: T,
    label: &str,
) -> ValidationResult {
    match value {
        Some(v) if v <= T::default() || v > max => Err(ValidationError::new(
            field,
            ValidationCode::OutOfRange,
            format!("{} must be between 1 and {}", label, max),
        )),
        _ => Ok(()),
    }
}

/// Measurements recorded on a patient profile
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vitals {
    pub weight_kg: Option<f32>,
    pub height_cm: Option<f32>,
    pub systolic: Option<u16>,
    pub diastolic: Option<u16>,
}

pub fn validate_vitals(vitals: &Vitals) -> ValidationResult {
    in_range("weight_kg", vitals.weight_kg, 300.0, "weight (kg)")?;
    in_range("height_cm", vitals.height_cm, 250.0, "height (cm)")?;
    in_range("systolic", vitals.systolic, 300, "systolic pressure")?;
    in_range("diastolic", vitals.diastolic, 200, "diastolic pressure")?;
    Ok(())
}

/// Role-specific details required when an account is created
pub fn validate_staff_details(role: Role, specialty: &str, service: &str) -> ValidationResult {
    match role {
        Role::Doctor => require_text("specialty", specialty, MAX_SPECIALTY_LEN),
        Role::Nurse | Role::Secretary => require_text("service", service, MAX_SPECIALTY_LEN),
        Role::Patient | Role::Admin => Ok(()),
    }
}

pub fn validate_slot_times(date: &str, start: &str, end: &str) -> ValidationResult {
    validate_date("date", date)?;
    let window = BookingWindow::between(start, end)
        .map_err(|e| ValidationError::new("start_time", ValidationCode::Format, e.to_string()))?;
    if window.is_none() {
        return Err(ValidationError::new(
            "end_time",
            ValidationCode::OutOfRange,
            "must be later than the start time",
        ));
    }
    Ok(())
}
