//! Appointment Lifecycle Tests
//!
//! A booked appointment moves through the lifecycle under the control of
//! its doctor, and filing a consultation completes it exactly once.

#[cfg(test)]
mod scenarios {
    use crate::ledger::{Ledger, LedgerError};
    use esco_rules::{AppointmentStatus, PolicyDenied, Role, TransitionError};

    fn clinic() -> (Ledger, u32, u32, u32) {
        let mut ledger = Ledger::new();
        let patient = ledger.add_account(Role::Patient);
        let doctor = ledger.add_account(Role::Doctor);
        let admin = ledger.add_account(Role::Admin);
        (ledger, patient, doctor, admin)
    }

    /// Booking, then a consultation, leaves one completed appointment with
    /// exactly one consultation
    #[test]
    fn scenario_consultation_completes_appointment() {
        let (mut ledger, patient, doctor, _) = clinic();
        let appt = ledger
            .book(patient, patient, doctor, "2025-03-14", "09:30", "Persistent cough")
            .unwrap();
        assert_eq!(ledger.appointment(appt).unwrap().status, AppointmentStatus::Scheduled);

        ledger.file_consultation(doctor, appt, "Bronchitis").unwrap();

        assert_eq!(ledger.appointment(appt).unwrap().status, AppointmentStatus::Completed);
        assert_eq!(ledger.consultations_of(appt).len(), 1);
    }

    /// A second consultation fails and leaves the appointment untouched
    #[test]
    fn scenario_duplicate_consultation_has_no_side_effects() {
        let (mut ledger, patient, doctor, _) = clinic();
        let appt = ledger
            .book(patient, patient, doctor, "2025-03-14", "09:30", "Fever")
            .unwrap();
        ledger.file_consultation(doctor, appt, "Flu").unwrap();
        let before = ledger.appointment(appt).unwrap().clone();

        let err = ledger.file_consultation(doctor, appt, "Flu again").unwrap_err();
        assert_eq!(err, LedgerError::Conflict("consultation already exists".to_string()));
        assert_eq!(ledger.appointment(appt).unwrap(), &before);
        assert_eq!(ledger.consultations_of(appt).len(), 1);
    }

    /// A consultation on an appointment completed without one keeps its status
    #[test]
    fn scenario_consultation_on_completed_appointment() {
        let (mut ledger, patient, doctor, _) = clinic();
        let appt = ledger
            .book(patient, patient, doctor, "2025-03-14", "10:00", "Results")
            .unwrap();
        ledger.set_status(doctor, appt, AppointmentStatus::Completed).unwrap();
        let versions = ledger.appointment(appt).unwrap().versions;

        ledger.file_consultation(doctor, appt, "Normal").unwrap();
        let row = ledger.appointment(appt).unwrap();
        assert_eq!(row.status, AppointmentStatus::Completed);
        assert_eq!(row.versions, versions);
    }

    #[test]
    fn scenario_no_consultation_on_cancelled_appointment() {
        let (mut ledger, patient, doctor, _) = clinic();
        let appt = ledger
            .book(patient, patient, doctor, "2025-03-14", "10:00", "Check-up")
            .unwrap();
        ledger.set_status(patient, appt, AppointmentStatus::Cancelled).unwrap();

        assert_eq!(
            ledger.file_consultation(doctor, appt, "n/a").unwrap_err(),
            LedgerError::Transition(TransitionError::ConsultationOnCancelled)
        );
        assert!(ledger.consultations_of(appt).is_empty());
    }

    #[test]
    fn scenario_completed_cannot_go_back_to_scheduled() {
        let (mut ledger, patient, doctor, admin) = clinic();
        let appt = ledger
            .book(patient, patient, doctor, "2025-03-14", "11:00", "Check-up")
            .unwrap();
        ledger.set_status(doctor, appt, AppointmentStatus::Confirmed).unwrap();
        ledger.set_status(doctor, appt, AppointmentStatus::InProgress).unwrap();
        ledger.set_status(doctor, appt, AppointmentStatus::Completed).unwrap();

        assert_eq!(
            ledger.set_status(admin, appt, AppointmentStatus::Scheduled).unwrap_err(),
            LedgerError::Transition(TransitionError::Terminal(AppointmentStatus::Completed))
        );
    }

    #[test]
    fn scenario_patient_may_only_cancel() {
        let (mut ledger, patient, doctor, _) = clinic();
        let appt = ledger
            .book(patient, patient, doctor, "2025-03-14", "11:00", "Check-up")
            .unwrap();
        assert!(matches!(
            ledger.set_status(patient, appt, AppointmentStatus::Confirmed),
            Err(LedgerError::Transition(TransitionError::RoleNotAllowed { .. }))
        ));
        ledger.set_status(patient, appt, AppointmentStatus::Cancelled).unwrap();
    }

    #[test]
    fn scenario_other_doctor_cannot_touch_appointment() {
        let (mut ledger, patient, doctor, _) = clinic();
        let colleague = ledger.add_account(Role::Doctor);
        let appt = ledger
            .book(patient, patient, doctor, "2025-03-14", "11:00", "Check-up")
            .unwrap();
        assert!(matches!(
            ledger.set_status(colleague, appt, AppointmentStatus::Confirmed),
            Err(LedgerError::Policy(PolicyDenied::NotOwner { .. }))
        ));
        assert!(matches!(
            ledger.file_consultation(colleague, appt, "n/a"),
            Err(LedgerError::Policy(_))
        ));
    }

    #[test]
    fn scenario_patient_books_only_for_self() {
        let (mut ledger, patient, doctor, _) = clinic();
        let other = ledger.add_account(Role::Patient);
        assert!(matches!(
            ledger.book(patient, other, doctor, "2025-03-14", "11:00", "Check-up"),
            Err(LedgerError::Policy(PolicyDenied::NotOwner { .. }))
        ));
    }

    #[test]
    fn scenario_secretary_cannot_book() {
        let (mut ledger, patient, doctor, _) = clinic();
        let secretary = ledger.add_account(Role::Secretary);
        assert!(matches!(
            ledger.book(secretary, patient, doctor, "2025-03-14", "11:00", "Check-up"),
            Err(LedgerError::Policy(PolicyDenied::NotPermitted { .. }))
        ));
    }

    #[test]
    fn scenario_inactive_patient_cannot_act() {
        let (mut ledger, patient, doctor, _) = clinic();
        let appt = ledger
            .book(patient, patient, doctor, "2025-03-14", "11:00", "Check-up")
            .unwrap();
        ledger.deactivate(patient);
        assert_eq!(
            ledger.set_status(patient, appt, AppointmentStatus::Cancelled).unwrap_err(),
            LedgerError::Policy(PolicyDenied::Inactive)
        );
    }
}
