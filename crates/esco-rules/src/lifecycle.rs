//! Appointment status lifecycle
//!
//! ```text
//! Scheduled -> Confirmed -> InProgress -> Completed
//!     \            \            \
//!      +------------+------------+--> Cancelled
//! ```
//!
//! Scheduled and Confirmed may also jump straight to Completed when a
//! consultation is filed. Completed and Cancelled are terminal.

use crate::role::{Actor, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    /// Whether the appointment still occupies the doctor's time
    pub fn blocks_slot(&self) -> bool {
        *self != AppointmentStatus::Cancelled
    }

    /// Direct successors in the lifecycle graph
    pub fn successors(&self) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match self {
            Scheduled => &[Confirmed, InProgress, Completed, Cancelled],
            Confirmed => &[InProgress, Completed, Cancelled],
            InProgress => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        self.successors().contains(&next)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("appointment is already {0}")]
    Unchanged(AppointmentStatus),
    #[error("appointment is {0} and can no longer change")]
    Terminal(AppointmentStatus),
    #[error("cannot move an appointment from {from} to {to}")]
    Illegal {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    #[error("a {role} cannot set an appointment to {to}")]
    RoleNotAllowed { role: Role, to: AppointmentStatus },
    #[error("cannot record a consultation for a cancelled appointment")]
    ConsultationOnCancelled,
}

/// Validated transition function
pub fn transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<AppointmentStatus, TransitionError> {
    if from == to {
        return Err(TransitionError::Unchanged(from));
    }
    if from.is_terminal() {
        return Err(TransitionError::Terminal(from));
    }
    if !from.can_transition_to(to) {
        return Err(TransitionError::Illegal { from, to });
    }
    Ok(to)
}

/// Status changes a role may request directly, on top of the policy check.
///
/// Patients may only cancel; every other role is limited by the graph alone.
pub fn check_role_transition<Id>(
    actor: &Actor<Id>,
    to: AppointmentStatus,
) -> Result<(), TransitionError> {
    if actor.is_admin() {
        return Ok(());
    }
    match actor.role {
        Role::Patient if to != AppointmentStatus::Cancelled => Err(TransitionError::RoleNotAllowed {
            role: actor.role,
            to,
        }),
        _ => Ok(()),
    }
}

/// Status to write when a consultation is filed.
///
/// `Ok(None)` means the appointment is already completed and must not be
/// rewritten.
pub fn status_after_consultation(
    current: AppointmentStatus,
) -> Result<Option<AppointmentStatus>, TransitionError> {
    match current {
        AppointmentStatus::Cancelled => Err(TransitionError::ConsultationOnCancelled),
        AppointmentStatus::Completed => Ok(None),
        other => transition(other, AppointmentStatus::Completed).map(Some),
    }
}

/// Actions offered for bulk overrides
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BulkStatusAction {
    Confirm,
    Complete,
    Cancel,
}

impl BulkStatusAction {
    pub fn target(&self) -> AppointmentStatus {
        match self {
            BulkStatusAction::Confirm => AppointmentStatus::Confirmed,
            BulkStatusAction::Complete => AppointmentStatus::Completed,
            BulkStatusAction::Cancel => AppointmentStatus::Cancelled,
        }
    }
}

/// Outcome of planning a bulk override over a selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkPlan<K> {
    /// Items to rewrite with the target status
    pub to_update: Vec<K>,
    /// Items already in the target status
    pub unchanged: Vec<K>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{key}: {error}")]
pub struct BulkRejected<K: fmt::Display> {
    pub key: K,
    pub error: TransitionError,
}

/// Plan a bulk override. Either every selected item can take the target
/// status, or nothing is planned.
pub fn plan_bulk<K: Clone + fmt::Display>(
    selection: &[(K, AppointmentStatus)],
    action: BulkStatusAction,
) -> Result<BulkPlan<K>, BulkRejected<K>> {
    let target = action.target();
    let mut plan = BulkPlan {
        to_update: Vec::new(),
        unchanged: Vec::new(),
    };

    for (key, current) in selection {
        match transition(*current, target) {
            Ok(_) => plan.to_update.push(key.clone()),
            Err(TransitionError::Unchanged(_)) => plan.unchanged.push(key.clone()),
            Err(error) => {
                return Err(BulkRejected {
                    key: key.clone(),
                    error,
                })
            }
        }
    }

    Ok(plan)
}
