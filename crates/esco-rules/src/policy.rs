//! Access policy
//!
//! One table decides what every role may do with every kind of record.
//! Zomes never branch on roles themselves: they build an [`Ownership`] for
//! the record at hand and call [`authorize`].

use crate::role::{Actor, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of records guarded by the policy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Account,
    PatientProfile,
    Appointment,
    Consultation,
    NursingCare,
    Prescription,
    ScheduleSlot,
    DoctorDirectory,
    MedicalDossier,
    /// Who treats whom: the doctors of a patient, the patients of a doctor
    CareTeam,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Account => "account",
            ResourceKind::PatientProfile => "patient profile",
            ResourceKind::Appointment => "appointment",
            ResourceKind::Consultation => "consultation",
            ResourceKind::NursingCare => "nursing care",
            ResourceKind::Prescription => "prescription",
            ResourceKind::ScheduleSlot => "schedule slot",
            ResourceKind::DoctorDirectory => "doctor directory",
            ResourceKind::MedicalDossier => "medical dossier",
            ResourceKind::CareTeam => "care team",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Read,
    Create,
    Update,
    Delete,
    /// Appointment status change
    Transition,
    Export,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::List => "list",
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Transition => "change the status of",
            Action::Export => "export",
        };
        f.write_str(name)
    }
}

/// How far a permission reaches
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Scope {
    /// Every record of the kind
    All,
    /// Only records where the actor is the assigned party for their role
    Own,
    None,
}

/// Parties attached to a record, as far as the policy is concerned
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ownership<Id> {
    pub patient: Option<Id>,
    pub doctor: Option<Id>,
    pub nurse: Option<Id>,
    /// Account the record belongs to (schedule slots, the account itself)
    pub owner: Option<Id>,
    /// Doctors with at least one appointment with the patient
    pub care_team: Vec<Id>,
}

impl<Id> Default for Ownership<Id> {
    fn default() -> Self {
        Self {
            patient: None,
            doctor: None,
            nurse: None,
            owner: None,
            care_team: Vec::new(),
        }
    }
}

impl<Id> Ownership<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patient(mut self, id: Id) -> Self {
        self.patient = Some(id);
        self
    }

    pub fn doctor(mut self, id: Id) -> Self {
        self.doctor = Some(id);
        self
    }

    pub fn nurse(mut self, id: Id) -> Self {
        self.nurse = Some(id);
        self
    }

    pub fn owner(mut self, id: Id) -> Self {
        self.owner = Some(id);
        self
    }

    pub fn care_team(mut self, doctors: Vec<Id>) -> Self {
        self.care_team = doctors;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolicyDenied {
    #[error("account is inactive")]
    Inactive,
    #[error("a {role} may not {action} {resource} records")]
    NotPermitted {
        role: Role,
        action: Action,
        resource: ResourceKind,
    },
    #[error("a {role} may only {action} their own {resource} records")]
    NotOwner {
        role: Role,
        action: Action,
        resource: ResourceKind,
    },
    #[error("a patient cannot be assigned as the doctor of an appointment")]
    SelfAsDoctor,
}

/// The policy table.
///
/// Administrators are handled before the table is consulted; the rows below
/// describe the four non-admin roles.
pub fn scope_for(role: Role, resource: ResourceKind, action: Action) -> Scope {
    use Action::*;
    use ResourceKind::*;
    use Scope::{All as Any, None as Never, Own};

    match role {
        Role::Admin => Any,
        Role::Patient => match (resource, action) {
            (Account | PatientProfile, List | Read | Update) => Own,
            (Appointment, List | Read | Create | Transition) => Own,
            (Consultation | NursingCare | Prescription, List | Read) => Own,
            (ScheduleSlot | DoctorDirectory, List | Read) => Any,
            (MedicalDossier, Read | Export) => Own,
            (CareTeam, List | Read) => Own,
            _ => Never,
        },
        Role::Doctor => match (resource, action) {
            (Account, List | Read | Update) => Own,
            (PatientProfile, List | Read | Update) => Own,
            (Appointment, _) if action != Export => Own,
            (Consultation, List | Read | Create | Update) => Own,
            (NursingCare, List | Read) => Own,
            (Prescription, List | Read | Create) => Own,
            (ScheduleSlot, List | Read | Create | Update | Delete) => Own,
            (DoctorDirectory, List | Read) => Any,
            (MedicalDossier, Read | Export) => Own,
            (CareTeam, List | Read) => Own,
            _ => Never,
        },
        Role::Nurse => match (resource, action) {
            (Account, List | Read) => Any,
            (Account, Update) => Own,
            (PatientProfile, List | Read | Update) => Any,
            (Appointment | Consultation | Prescription, List | Read) => Any,
            (NursingCare, List | Read) => Any,
            (NursingCare, Create | Update) => Own,
            (ScheduleSlot, List | Read) => Any,
            (ScheduleSlot, Create | Update | Delete) => Own,
            (DoctorDirectory, List | Read) => Any,
            (MedicalDossier, Read | Export) => Any,
            (CareTeam, List | Read) => Any,
            _ => Never,
        },
        Role::Secretary => match (resource, action) {
            (Account, List | Read) => Any,
            (Account, Update) => Own,
            (Appointment, List | Read) => Any,
            (ScheduleSlot, List | Read) => Any,
            (ScheduleSlot, Create | Update | Delete) => Own,
            (DoctorDirectory, List | Read) => Any,
            _ => Never,
        },
    }
}

/// Effective scope of an actor for a listing, before looking at any record
pub fn effective_scope<Id>(actor: &Actor<Id>, resource: ResourceKind, action: Action) -> Scope {
    if !actor.is_active {
        return Scope::None;
    }
    if actor.is_admin() {
        return Scope::All;
    }
    scope_for(actor.role, resource, action)
}

/// Whether the actor is the assigned party of the record for their role
pub fn is_assigned<Id: PartialEq>(actor: &Actor<Id>, ownership: &Ownership<Id>) -> bool {
    let me = Some(&actor.account);
    if ownership.owner.as_ref() == me {
        return true;
    }
    match actor.role {
        Role::Patient => ownership.patient.as_ref() == me,
        Role::Doctor => {
            ownership.doctor.as_ref() == me || ownership.care_team.contains(&actor.account)
        }
        Role::Nurse => ownership.nurse.as_ref() == me,
        Role::Secretary | Role::Admin => false,
    }
}

/// Single authorization check for every zome operation
pub fn authorize<Id: PartialEq>(
    actor: &Actor<Id>,
    resource: ResourceKind,
    ownership: &Ownership<Id>,
    action: Action,
) -> Result<(), PolicyDenied> {
    if !actor.is_active {
        return Err(PolicyDenied::Inactive);
    }

    if actor.role == Role::Patient
        && resource == ResourceKind::Appointment
        && ownership.doctor.as_ref() == Some(&actor.account)
    {
        return Err(PolicyDenied::SelfAsDoctor);
    }

    match effective_scope(actor, resource, action) {
        Scope::All => Ok(()),
        Scope::Own if is_assigned(actor, ownership) => Ok(()),
        Scope::Own => Err(PolicyDenied::NotOwner {
            role: actor.role,
            action,
            resource,
        }),
        Scope::None => Err(PolicyDenied::NotPermitted {
            role: actor.role,
            action,
            resource,
        }),
    }
}

/// Part of a patient's care team the actor may learn.
///
/// Patients see their own team, nurses and administrators any team. A
/// doctor only learns whether they belong to it: the result is either empty
/// or the doctor alone.
pub fn visible_care_team<Id: PartialEq + Clone>(
    actor: &Actor<Id>,
    patient: &Id,
    team: Vec<Id>,
) -> Result<Vec<Id>, PolicyDenied> {
    if actor.role == Role::Doctor && !actor.is_admin() {
        let membership = Ownership::new().doctor(actor.account.clone());
        authorize(actor, ResourceKind::CareTeam, &membership, Action::Read)?;
        return Ok(team.into_iter().filter(|d| *d == actor.account).collect());
    }
    let ownership = Ownership::new().patient(patient.clone());
    authorize(actor, ResourceKind::CareTeam, &ownership, Action::Read)?;
    Ok(team)
}

/// Keep only the items the actor may read
pub fn filter_visible<Id, T, F>(
    actor: &Actor<Id>,
    resource: ResourceKind,
    items: Vec<T>,
    ownership_of: F,
) -> Vec<T>
where
    Id: PartialEq,
    F: Fn(&T) -> Ownership<Id>,
{
    items
        .into_iter()
        .filter(|item| authorize(actor, resource, &ownership_of(item), Action::Read).is_ok())
        .collect()
}
