// Test suite for the amendment ledger
// Covers creation, delta computation, the pending -> approved/rejected
// state machine, and terminality of resolved states.

mod common;

use common::{setup_conn, setup_run};
use paysnap_core::errors::PayErrorKind;
use paysnap_core::model::ApprovalStatus;
use paysnap_store::amendments::{
    approve_amendment, create_amendment, fetch_amendment, list_amendments_for_run,
    reject_amendment, AmendmentInput,
};

fn input(run_id: i64) -> AmendmentInput<'static> {
    AmendmentInput {
        run_id,
        employee_detail_id: None,
        amendment_type: "manual_adjustment",
        field_name: "grossEarnings",
        old_value: 1000.0,
        new_value: 1200.0,
        reason: "Missed overtime from the previous period",
        requested_by: Some(7),
    }
}

#[test]
fn test_create_amendment_computes_delta_and_starts_pending() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let amendment_id = create_amendment(&conn, &input(run.run_id)).unwrap();

    let row = fetch_amendment(&conn, amendment_id).unwrap();
    assert_eq!(row.approval_status, ApprovalStatus::Pending);
    assert_eq!(row.delta, 200.0);
    assert_eq!(row.field_name, "grossEarnings");
    assert!(row.resolved_at.is_none());
}

#[test]
fn test_negative_delta() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let amendment_id = create_amendment(
        &conn,
        &AmendmentInput {
            old_value: 500.0,
            new_value: 420.0,
            ..input(run.run_id)
        },
    )
    .unwrap();
    let row = fetch_amendment(&conn, amendment_id).unwrap();
    assert_eq!(row.delta, -80.0);
}

#[test]
fn test_approve_is_terminal() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let amendment_id = create_amendment(&conn, &input(run.run_id)).unwrap();

    approve_amendment(&conn, amendment_id, Some(9)).unwrap();
    let row = fetch_amendment(&conn, amendment_id).unwrap();
    assert_eq!(row.approval_status, ApprovalStatus::Approved);
    assert_eq!(row.resolved_by, Some(9));
    assert!(row.resolved_at.is_some());

    // No further transitions, in either direction
    let err = reject_amendment(&conn, amendment_id, Some(9)).unwrap_err();
    assert_eq!(err.kind(), PayErrorKind::ConstraintViolation);
    let err = approve_amendment(&conn, amendment_id, Some(9)).unwrap_err();
    assert_eq!(err.kind(), PayErrorKind::ConstraintViolation);
}

#[test]
fn test_reject_is_terminal() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let amendment_id = create_amendment(&conn, &input(run.run_id)).unwrap();

    reject_amendment(&conn, amendment_id, None).unwrap();
    let row = fetch_amendment(&conn, amendment_id).unwrap();
    assert_eq!(row.approval_status, ApprovalStatus::Rejected);

    let err = approve_amendment(&conn, amendment_id, None).unwrap_err();
    assert_eq!(err.kind(), PayErrorKind::ConstraintViolation);
}

#[test]
fn test_resolve_missing_amendment_is_not_found() {
    let conn = setup_conn();
    let err = approve_amendment(&conn, 404, None).unwrap_err();
    assert_eq!(err.kind(), PayErrorKind::NotFound);
}

#[test]
fn test_create_for_missing_run_is_not_found() {
    let conn = setup_conn();
    let err = create_amendment(&conn, &input(404)).unwrap_err();
    assert_eq!(err.kind(), PayErrorKind::NotFound);
}

#[test]
fn test_list_amendments_in_creation_order() {
    let mut conn = setup_conn();
    let run = setup_run(&mut conn);
    let first = create_amendment(&conn, &input(run.run_id)).unwrap();
    let second = create_amendment(
        &conn,
        &AmendmentInput {
            field_name: "netPay",
            ..input(run.run_id)
        },
    )
    .unwrap();

    let rows = list_amendments_for_run(&conn, run.run_id).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].amendment_id, first);
    assert_eq!(rows[1].amendment_id, second);
}
