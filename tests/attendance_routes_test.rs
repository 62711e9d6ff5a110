// ABOUTME: Integration tests for attendance CRUD and the daily desk submission
// ABOUTME: Session counting, desk payments, balance movement and all-or-nothing batches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_member, create_test_router};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use wellstudio_server::models::{MemberInput, Money};

#[tokio::test]
async fn test_submit_counts_session_once_per_day() {
    let (router, resources) = create_test_router().await.unwrap();
    let member = create_test_member(&resources.database, "M001", "Asha Nair")
        .await
        .unwrap();

    let sheet = json!({
        "date": "2025-03-10",
        "entries": [{ "member_id": member.id, "present": true }]
    });
    for _ in 0..2 {
        let summary: Value = AxumTestRequest::post("/api/attendance/submit")
            .json(&sheet)
            .send(router.clone())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(summary["status"], "ok");
        assert_eq!(summary["submitted_count"], 1);
    }

    let stored = resources.database.members().get(member.id).await.unwrap().unwrap();
    assert_eq!(stored.ums_count, 1);

    let rows = resources.database.attendance().list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].present);
    assert_eq!(rows[0].member_name, "Asha Nair");
    assert!(rows[0].submitted_at.is_some());
}

#[tokio::test]
async fn test_submit_books_payment_and_moves_balance() {
    let (router, resources) = create_test_router().await.unwrap();
    let member = create_test_member(&resources.database, "M002", "Ravi Menon")
        .await
        .unwrap();
    let input = MemberInput {
        member_code: member.member_code.clone(),
        full_name: member.full_name.clone(),
        phone: member.phone.clone(),
        balance: Money::from_minor(540_000),
        ..MemberInput::default()
    };
    resources
        .database
        .members()
        .replace(member.id, &input)
        .await
        .unwrap();

    let summary: Value = AxumTestRequest::post("/api/attendance/submit")
        .json(&json!({
            "date": "2025-03-10",
            "entries": [{
                "member_id": member.id,
                "present": true,
                "paid_amount": "1500.50",
                "method": "  upi ",
                "notes": "Desk"
            }]
        }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(summary["total_received"], 1500.5);

    let stored = resources.database.members().get(member.id).await.unwrap().unwrap();
    assert_eq!(stored.balance.to_string(), "3899.50");
    assert_eq!(stored.total_paid.to_string(), "1500.50");
    assert_eq!(stored.ums_count, 1);

    let payments = resources.database.payments().list().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].method.as_deref(), Some("upi"));
    assert_eq!(payments[0].date.to_string(), "2025-03-10");

    let report: Value = AxumTestRequest::get("/api/report/daily?date=2025-03-10")
        .send(router)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(report["total_present"], 1);
    assert_eq!(report["total_received"], 1500.5);
    assert_eq!(report["attendances"][0]["member_name"], "Ravi Menon");
}

#[tokio::test]
async fn test_absent_entry_with_payment_defaults_to_cash() {
    let (router, resources) = create_test_router().await.unwrap();
    let member = create_test_member(&resources.database, "M003", "Lata Shetty")
        .await
        .unwrap();

    AxumTestRequest::post("/api/attendance/submit")
        .json(&json!({
            "date": "2025-03-11",
            "entries": [{ "member_id": member.id, "present": false, "paid_amount": 200 }]
        }))
        .send(router)
        .await
        .assert_status(StatusCode::OK);

    let stored = resources.database.members().get(member.id).await.unwrap().unwrap();
    assert_eq!(stored.ums_count, 0);
    assert_eq!(stored.balance.to_string(), "-200.00");

    let payments = resources.database.payments().list().await.unwrap();
    assert_eq!(payments[0].method.as_deref(), Some("cash"));
}

#[tokio::test]
async fn test_unknown_member_rolls_back_batch() {
    let (router, resources) = create_test_router().await.unwrap();
    let member = create_test_member(&resources.database, "M004", "Dev Patel")
        .await
        .unwrap();

    let response = AxumTestRequest::post("/api/attendance/submit")
        .json(&json!({
            "date": "2025-03-12",
            "entries": [
                { "member_id": member.id, "present": true, "paid_amount": 100 },
                { "member_id": 9999, "present": true }
            ]
        }))
        .send(router)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    let stored = resources.database.members().get(member.id).await.unwrap().unwrap();
    assert_eq!(stored.ums_count, 0);
    assert_eq!(stored.balance, Money::ZERO);
    assert!(resources.database.attendance().list().await.unwrap().is_empty());
    assert!(resources.database.payments().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_attendance_crud() {
    let (router, resources) = create_test_router().await.unwrap();
    let member = create_test_member(&resources.database, "M005", "Gita Rao")
        .await
        .unwrap();

    let created: Value = AxumTestRequest::post("/api/attendances")
        .json(&json!({ "member_id": member.id, "date": "2025-03-13", "present": true }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["member_name"], "Gita Rao");

    AxumTestRequest::post("/api/attendances")
        .json(&json!({ "member_id": member.id, "date": "2025-03-13" }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CONFLICT);

    let updated: Value = AxumTestRequest::put(&format!("/api/attendances/{id}"))
        .json(&json!({
            "member_id": member.id,
            "date": "2025-03-13",
            "present": false,
            "paid_amount": 50,
            "notes": "left early"
        }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["present"], false);
    assert_eq!(updated["paid_amount"], 50.0);

    AxumTestRequest::delete(&format!("/api/attendances/{id}"))
        .send(router.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    AxumTestRequest::get(&format!("/api/attendances/{id}"))
        .send(router)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
