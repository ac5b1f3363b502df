//! Sweettest Integration Tests for Role Access
//!
//! Account creation rights and who may read whose records.


use anyhow::Result;
use common::*;
use holochain::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DossierPatient {
    first_name: String,
}

/// Head of a medical dossier; the record lists are not inspected here
#[derive(Debug, Deserialize)]
struct DossierHead {
    patient_hash: ActionHash,
    patient: DossierPatient,
}

#[tokio::test]
#[ignore = "Requires running Holochain conductor"]
async fn test_second_admin_bootstrap_is_refused() -> Result<()> {
    let clinic = setup_clinic().await?;
    enrol(&clinic).await?;

    let again: Result<AccountView, _> = clinic
        .conductor
        .call_zome(
            &clinic.doctor,
            "accounts",
            "bootstrap_admin",
            serde_json::json!({
                "username": "intruder",
                "first_name": "Not",
                "last_name": "Admin",
                "email": "intruder@example.com",
                "phone": "",
            }),
        )
        .await;
    assert!(again.is_err(), "Only the first administrator can bootstrap");

    Ok(())
}

#[tokio::test]
#[ignore = "Requires running Holochain conductor"]
async fn test_patient_cannot_create_staff() -> Result<()> {
    let clinic = setup_clinic().await?;
    enrol(&clinic).await?;

    let result: Result<AccountView, _> = clinic
        .conductor
        .call_zome(
            &clinic.patient,
            "accounts",
            "create_staff_account",
            serde_json::json!({
                "agent": clinic.patient.agent_pubkey().clone(),
                "username": "self.promoted",
                "first_name": "Awa",
                "last_name": "Diop",
                "email": "self@example.com",
                "phone": "",
                "role": Role::Doctor,
            }),
        )
        .await;
    assert!(result.is_err(), "Patients cannot create staff accounts");

    Ok(())
}

#[tokio::test]
#[ignore = "Requires running Holochain conductor"]
async fn test_patient_reads_own_dossier_only() -> Result<()> {
    let clinic = setup_clinic().await?;
    let (admin, doctor, patient) = enrol(&clinic).await?;

    let own: DossierHead = clinic
        .conductor
        .call_zome(&clinic.patient, "dossier", "get_my_dossier", ())
        .await?;
    assert_eq!(own.patient.first_name, "Awa");

    let foreign: Result<DossierHead, _> = clinic
        .conductor
        .call_zome(
            &clinic.doctor,
            "dossier",
            "get_medical_dossier",
            patient.account_hash.clone(),
        )
        .await;
    assert!(
        foreign.is_err(),
        "A doctor without appointments is outside the care team"
    );

    let by_admin: DossierHead = clinic
        .conductor
        .call_zome(
            &clinic.admin,
            "dossier",
            "get_medical_dossier",
            patient.account_hash.clone(),
        )
        .await?;
    assert_eq!(by_admin.patient_hash, patient.account_hash);
    assert_ne!(admin.account_hash, doctor.account_hash);

    Ok(())
}
