// ABOUTME: Integration tests for dashboard statistics and the daily attendance report
// ABOUTME: Member totals, today's attendance, outstanding balances and per-day summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use chrono::Utc;
use common::{create_test_member, create_test_router, registration_request};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_dashboard_stats_on_empty_database() {
    let (router, _resources) = create_test_router().await.unwrap();

    let stats: Value = AxumTestRequest::get("/api/dashboard/stats")
        .send(router)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(stats["total_members"], 0);
    assert_eq!(stats["today_attendance"], 0);
    assert_eq!(stats["total_outstanding_balance"], 0.0);
}

#[tokio::test]
async fn test_dashboard_stats_counts_today_only() {
    let (router, resources) = create_test_router().await.unwrap();

    AxumTestRequest::post("/api/registrations")
        .json(&registration_request("Anil Kumble", "9000000301"))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CREATED);
    let other = create_test_member(&resources.database, "M020", "Bina Das")
        .await
        .unwrap();

    AxumTestRequest::post("/api/attendance/submit")
        .json(&json!({ "entries": [{ "member_id": other.id, "present": true }] }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK);
    AxumTestRequest::post("/api/attendance/submit")
        .json(&json!({
            "date": "2024-12-31",
            "entries": [{ "member_id": other.id, "present": true }]
        }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK);

    let stats: Value = AxumTestRequest::get("/api/dashboard/stats")
        .send(router)
        .await
        .json();
    assert_eq!(stats["total_members"], 2);
    assert_eq!(stats["today_attendance"], 1);
    assert_eq!(stats["total_outstanding_balance"], 3400.0);
}

#[tokio::test]
async fn test_daily_report_lists_present_members_by_name() {
    let (router, resources) = create_test_router().await.unwrap();
    let zubin = create_test_member(&resources.database, "M030", "Zubin Mehta")
        .await
        .unwrap();
    let alka = create_test_member(&resources.database, "M031", "Alka Yagnik")
        .await
        .unwrap();
    let absent = create_test_member(&resources.database, "M032", "Manoj Bajpai")
        .await
        .unwrap();

    AxumTestRequest::post("/api/attendance/submit")
        .json(&json!({
            "date": "2025-04-01",
            "entries": [
                { "member_id": zubin.id, "present": true, "paid_amount": 300 },
                { "member_id": alka.id, "present": true, "paid_amount": "150.75" },
                { "member_id": absent.id, "present": false, "paid_amount": 99 }
            ]
        }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK);

    let report: Value = AxumTestRequest::get("/api/report/daily?date=2025-04-01")
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(report["date"], "2025-04-01");
    assert_eq!(report["total_present"], 2);
    assert_eq!(report["total_received"], 450.75);
    assert_eq!(report["attendances"][0]["member_name"], "Alka Yagnik");
    assert_eq!(report["attendances"][1]["member_name"], "Zubin Mehta");

    let today: Value = AxumTestRequest::get("/api/report/daily")
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        today["date"],
        Utc::now().date_naive().format("%Y-%m-%d").to_string()
    );
    assert_eq!(today["total_present"], 0);

    let response = AxumTestRequest::get("/api/report/daily?date=yesterday")
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
