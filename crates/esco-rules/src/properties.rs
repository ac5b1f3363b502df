//! DNA properties.
//!
//! Read from `workdir/dna.yaml`; every field falls back to a default so an
//! empty properties block still yields a working DNA.

use serde::{Deserialize, Serialize};

pub const DEFAULT_APPOINTMENT_MINUTES: u32 = 30;
pub const DEFAULT_PATIENT_NUMBER_PREFIX: &str = "PAT";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EscoProperties {
    /// Agent key (as printed by the conductor) allowed to author admin and
    /// staff accounts
    #[serde(default)]
    pub progenitor: Option<String>,
    #[serde(default = "default_appointment_minutes")]
    pub appointment_minutes: u32,
    #[serde(default = "default_patient_number_prefix")]
    pub patient_number_prefix: String,
}

fn default_appointment_minutes() -> u32 {
    DEFAULT_APPOINTMENT_MINUTES
}

fn default_patient_number_prefix() -> String {
    DEFAULT_PATIENT_NUMBER_PREFIX.to_string()
}

impl Default for EscoProperties {
    fn default() -> Self {
        Self {
            progenitor: None,
            appointment_minutes: DEFAULT_APPOINTMENT_MINUTES,
            patient_number_prefix: DEFAULT_PATIENT_NUMBER_PREFIX.to_string(),
        }
    }
}

impl EscoProperties {
    /// Booking length, never zero
    pub fn booking_minutes(&self) -> u32 {
        self.appointment_minutes.max(1)
    }

    /// Patient number built from the prefix and a per-registration seed,
    /// e.g. `PAT-3F9A12C4`
    pub fn patient_number(&self, seed: &[u8]) -> String {
        let tail: String = seed
            .iter()
            .take(4)
            .map(|b| format!("{:02X}", b))
            .collect();
        format!("{}-{}", self.patient_number_prefix, tail)
    }
}
