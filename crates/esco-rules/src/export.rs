//! Plain-text rendering of medical dossiers and prescription sheets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_RECENT_APPOINTMENTS: usize = 5;
pub const MAX_TREATMENT_LINES: usize = 10;
const MAX_LINE_CHARS: usize = 80;
const MAX_DIAGNOSIS_CHARS: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppointmentLine {
    pub date: String,
    pub time: String,
    pub doctor_name: String,
    pub reason: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DossierSummary {
    pub patient_name: String,
    pub patient_number: String,
    pub phone: String,
    pub blood_type: String,
    pub allergies: String,
    /// Newest first
    pub appointments: Vec<AppointmentLine>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionSheet {
    pub doctor_name: String,
    pub patient_name: String,
    pub date: String,
    pub diagnosis: String,
    pub treatment: String,
}

impl PrescriptionSheet {
    /// Treatment split into printable lines, capped at ten
    pub fn treatment_lines(&self) -> Vec<String> {
        self.treatment
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(MAX_TREATMENT_LINES)
            .map(|l| truncate(l, MAX_LINE_CHARS))
            .collect()
    }
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// `dd/mm/YYYY at HH:MM` from a microsecond timestamp, UTC
pub fn format_generated_at(micros: i64) -> String {
    DateTime::<Utc>::from_timestamp_micros(micros)
        .map(|dt| dt.format("%d/%m/%Y at %H:%M").to_string())
        .unwrap_or_else(|| "unknown date".to_string())
}

/// `YYYY-MM-DD` calendar day of a microsecond timestamp, UTC
pub fn date_from_micros(micros: i64) -> String {
    DateTime::<Utc>::from_timestamp_micros(micros)
        .map(|dt| dt.format(crate::booking::DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// `YYYY-MM-DD` shown as `dd/mm/YYYY`; unparseable dates pass through
fn display_date(date: &str) -> String {
    crate::booking::parse_date(date)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn footer(generated_at_micros: i64) -> String {
    format!(
        "Document generated on {} - ESCO",
        format_generated_at(generated_at_micros)
    )
}

pub fn render_dossier_text(summary: &DossierSummary, generated_at_micros: i64) -> String {
    let mut out = Vec::new();
    out.push("ESCO MEDICAL DOSSIER".to_string());
    out.push(String::new());
    out.push(format!("Patient: {}", summary.patient_name));
    out.push(format!("Patient number: {}", summary.patient_number));
    if !summary.phone.is_empty() {
        out.push(format!("Phone: {}", summary.phone));
    }
    let blood = if summary.blood_type.is_empty() {
        "Not recorded"
    } else {
        summary.blood_type.as_str()
    };
    out.push(format!("Blood type: {}", blood));

    if !summary.allergies.trim().is_empty() {
        out.push(String::new());
        out.push("WARNING - ALLERGIES:".to_string());
        out.push(format!("  {}", truncate(summary.allergies.trim(), MAX_LINE_CHARS)));
    }

    out.push(String::new());
    out.push(format!("Recent appointments: ({})", summary.appointments.len()));
    for appt in summary.appointments.iter().take(MAX_RECENT_APPOINTMENTS) {
        out.push(format!(
            "  {} {} - Dr. {} - {} [{}]",
            display_date(&appt.date),
            appt.time,
            appt.doctor_name,
            truncate(&appt.reason, MAX_LINE_CHARS / 2),
            appt.status
        ));
    }

    out.push(String::new());
    out.push(footer(generated_at_micros));
    out.join("\n")
}

pub fn render_prescription_text(sheet: &PrescriptionSheet, generated_at_micros: i64) -> String {
    let mut out = Vec::new();
    out.push("ESCO PRESCRIPTION".to_string());
    out.push(String::new());
    out.push(format!("Dr. {}", sheet.doctor_name));
    out.push(format!("Patient: {}", sheet.patient_name));
    out.push(format!("Date: {}", display_date(&sheet.date)));
    out.push(String::new());
    out.push("DIAGNOSIS:".to_string());
    out.push(truncate(&sheet.diagnosis, MAX_DIAGNOSIS_CHARS));
    out.push(String::new());
    out.push("PRESCRIBED TREATMENT:".to_string());
    out.extend(sheet.treatment_lines());
    out.push(String::new());
    out.push("Present this prescription at the pharmacy.".to_string());
    out.push(footer(generated_at_micros));
    out.join("\n")
}
