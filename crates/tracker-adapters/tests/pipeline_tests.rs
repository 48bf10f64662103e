//! End-to-end runs of the validation service over the real adapters.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tracker_adapters::{
    CaptureScopeAccessManager, FixedClock, InMemoryPreheat, parse_bundle, parse_snapshot,
};
use tracker_core::prelude::*;

const SNAPSHOT: &str = r#"{
    "organisationUnits": [
        { "uid": "country", "name": "Country", "path": "/country" },
        { "uid": "district", "name": "District", "path": "/country/district" },
        { "uid": "clinic", "name": "Clinic", "path": "/country/district/clinic" },
        { "uid": "faraway", "name": "Faraway", "path": "/country/faraway" }
    ],
    "programs": [{
        "uid": "p1",
        "code": "ANC",
        "name": "Antenatal care",
        "programType": "WITH_REGISTRATION",
        "organisationUnits": ["clinic", "faraway"],
        "programStages": [{ "uid": "ps1", "name": "Visit", "program": "p1", "sortOrder": 1 }]
    }, {
        "uid": "p2",
        "name": "Child health",
        "organisationUnits": ["clinic"]
    }],
    "categoryOptionCombos": [{ "uid": "cocDefault", "name": "default", "isDefault": true }],
    "enrollments": [{
        "uid": "enOld",
        "program": "p2",
        "organisationUnit": { "uid": "clinic", "name": "Clinic", "path": "/country/district/clinic" }
    }]
}"#;

fn service() -> TrackerValidationService {
    TrackerValidationService::builder()
        .access_manager(Arc::new(CaptureScopeAccessManager::new()))
        .clock(Box::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        )))
        .build()
        .unwrap()
}

fn preheat() -> InMemoryPreheat {
    parse_snapshot(SNAPSHOT).unwrap().into_preheat()
}

fn bundle(body: &str) -> TrackerBundle {
    let user = r#""user": { "uid": "u1", "username": "clerk", "organisationUnits": ["district"] }"#;
    parse_bundle(&format!("{{ {user}, {body} }}")).unwrap()
}

#[test]
fn test_descendant_org_unit_is_in_capture_scope() {
    let mut bundle = bundle(
        r#""events": [
            { "event": "ev1", "program": "p1", "programStage": "ps1", "orgUnit": "clinic",
              "occurredAt": "2024-03-01T00:00:00Z" },
            { "event": "ev2", "program": "p1", "programStage": "ps1", "orgUnit": "faraway",
              "occurredAt": "2024-03-01T00:00:00Z" }
        ]"#,
    );

    let report = service().validate(&mut bundle, &mut preheat()).unwrap();

    assert_eq!(report.codes(), vec![TrackerErrorCode::E1000]);
    assert_eq!(report.error_reports[0].uid, "ev2");
    assert_eq!(report.error_reports[0].args, vec!["clerk", "faraway"]);
}

#[test]
fn test_update_of_unknown_enrollment_is_reported_once() {
    let mut bundle = bundle(
        r#""importStrategy": "update",
        "enrollments": [
            { "enrollment": "enNew", "trackedEntity": "te1", "program": "p1", "orgUnit": "clinic",
              "enrolledAt": "2024-01-01T00:00:00Z" }
        ]"#,
    );

    let report = service().validate(&mut bundle, &mut preheat()).unwrap();

    // Later hooks skip only their persisted-state checks; the rest pass.
    assert_eq!(report.codes(), vec![TrackerErrorCode::E1081]);
}

#[test]
fn test_update_cannot_move_enrollment_to_another_program() {
    let mut bundle = bundle(
        r#""importStrategy": "update",
        "enrollments": [
            { "enrollment": "enOld", "trackedEntity": "te1", "program": "p1", "orgUnit": "clinic",
              "enrolledAt": "2024-01-01T00:00:00Z" }
        ]"#,
    );

    let report = service().validate(&mut bundle, &mut preheat()).unwrap();

    assert_eq!(report.codes(), vec![TrackerErrorCode::E1094]);
    assert_eq!(report.error_reports[0].args, vec!["enOld", "p2"]);
}

#[test]
fn test_inferred_program_uses_payload_scheme() {
    let snapshot = parse_snapshot(&SNAPSHOT.replacen('{', r#"{ "identifiers": { "program": "code" },"#, 1))
        .unwrap();
    let mut preheat = snapshot.into_preheat();
    let mut bundle = bundle(
        r#""events": [
            { "event": "ev1", "programStage": "ps1", "orgUnit": "clinic",
              "occurredAt": "2024-03-01T00:00:00Z" }
        ]"#,
    );

    let report = service().validate(&mut bundle, &mut preheat).unwrap();

    assert!(report.is_empty(), "unexpected reports: {:?}", report.codes());
    assert_eq!(bundle.events[0].program.as_deref(), Some("ANC"));
}

#[test]
fn test_fail_fast_returns_exactly_one_report() {
    let mut bundle = bundle(
        r#""validationMode": "fail-fast",
        "events": [
            { "event": "ev1", "orgUnit": "nowhere" },
            { "event": "ev2" }
        ]"#,
    );

    let report = service().validate(&mut bundle, &mut preheat()).unwrap();

    assert_eq!(report.codes(), vec![TrackerErrorCode::E1011]);
    assert!(report.aborted);
}

#[test]
fn test_validation_without_user_is_a_fault() {
    let mut bundle = parse_bundle(
        r#"{ "events": [{ "event": "ev1", "program": "p1", "programStage": "ps1", "orgUnit": "clinic" }] }"#,
    )
    .unwrap();

    let err = service().validate(&mut bundle, &mut preheat()).unwrap_err();

    assert!(err.is_fault());
}
