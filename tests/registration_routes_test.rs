// ABOUTME: Integration tests for the guest registration route
// ABOUTME: Member creation, plan terms, initial payment, analysis storage and returning members
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellstudio Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_router, lean_evaluation, registration_form, registration_request};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_register_creates_member_payment_and_analysis() {
    let (router, resources) = create_test_router().await.unwrap();

    let response = AxumTestRequest::post("/api/registrations")
        .json(&registration_request("Rahul Verma", "9000000001"))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CREATED);
    let body: Value = response.json();

    let member = &body["member"];
    assert_eq!(member["full_name"], "Rahul Verma");
    assert_eq!(member["phone"], "9000000001");
    assert_eq!(member["membership"], "UMS");
    assert_eq!(member["membership_total_sessions"], 26);
    assert_eq!(member["ums_count"], 1);
    assert_eq!(member["total_paid"], 2000.0);
    assert_eq!(member["balance"], 3400.0);
    assert_eq!(member["latest_weight"], 60.0);
    assert_eq!(member["latest_height"], 170.0);
    assert!(member["member_code"].as_str().unwrap().starts_with('M'));

    assert_eq!(body["registration"]["plan_total_amount"], 5400.0);
    assert_eq!(body["registration"]["initial_amount_paid"], 2000.0);

    let evaluation = &body["body_evaluation"];
    assert_eq!(evaluation["date"], "2025-01-06");
    assert_eq!(evaluation["fat"], 1.0);
    assert_eq!(evaluation["fluids"], 0.0);
    assert_eq!(evaluation["analysis_data"]["fat_status"], "no_surplus");
    assert_eq!(evaluation["analysis_data"]["max_weight"], 66.5);

    let payments = resources.database.payments().list().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount.to_string(), "2000.00");
    assert_eq!(payments[0].method.as_deref(), Some("registration"));
}

#[tokio::test]
async fn test_register_without_payment_books_nothing() {
    let (router, resources) = create_test_router().await.unwrap();
    let mut form = registration_form("Neha Rao", "9000000002");
    form["membership"] = json!("TRIAL");
    form["initial_amount_paid"] = json!(0);

    let response = AxumTestRequest::post("/api/registrations")
        .json(&json!({ "registration": form, "body_evaluation": lean_evaluation() }))
        .send(router)
        .await
        .assert_status(StatusCode::CREATED);
    let body: Value = response.json();

    assert_eq!(body["member"]["membership_total_sessions"], 3);
    assert_eq!(body["member"]["balance"], 700.0);
    assert!(resources.database.payments().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_custom_plan_requires_days() {
    let (router, _resources) = create_test_router().await.unwrap();
    let mut form = registration_form("Arjun Das", "9000000003");
    form["membership"] = json!("OTHERS");

    let response = AxumTestRequest::post("/api/registrations")
        .json(&json!({ "registration": form.clone(), "body_evaluation": lean_evaluation() }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["details"]["field"], "number_of_days");

    form["number_of_days"] = json!(12);
    form["plan_total_amount"] = json!("2500");
    let response = AxumTestRequest::post("/api/registrations")
        .json(&json!({ "registration": form, "body_evaluation": lean_evaluation() }))
        .send(router)
        .await
        .assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["member"]["membership_total_sessions"], 12);
    assert_eq!(body["member"]["balance"], 500.0);
}

#[tokio::test]
async fn test_register_reports_missing_sections() {
    let (router, _resources) = create_test_router().await.unwrap();

    let response = AxumTestRequest::post("/api/registrations")
        .json(&json!({ "registration": registration_form("Kiran", "9000000004") }))
        .send(router)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();

    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(
        body["error"]["details"]["missing_fields"],
        json!(["body_evaluation"])
    );
}

#[tokio::test]
async fn test_register_reports_missing_form_fields() {
    let (router, resources) = create_test_router().await.unwrap();
    let mut form = registration_form("", "9000000005");
    form["age"] = json!(0);
    form["surveyed_by"] = json!("   ");

    let response = AxumTestRequest::post("/api/registrations")
        .json(&json!({ "registration": form, "body_evaluation": lean_evaluation() }))
        .send(router)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();

    assert_eq!(
        body["error"]["details"]["missing_fields"],
        json!(["guest_name", "age", "surveyed_by"])
    );
    assert!(resources.database.members().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_rejects_wrong_gender_columns() {
    let (router, resources) = create_test_router().await.unwrap();
    let mut evaluation = lean_evaluation();
    evaluation["body_fat_women"] = json!("31");

    let response = AxumTestRequest::post("/api/registrations")
        .json(&json!({
            "registration": registration_form("Vikram", "9000000006"),
            "body_evaluation": evaluation
        }))
        .send(router)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();

    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(resources.database.members().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_gender_is_matched_exactly() {
    let (router, _resources) = create_test_router().await.unwrap();
    let mut form = registration_form("Kiran Rao", "9000000007");
    form["gender"] = json!("male");

    let body: Value = AxumTestRequest::post("/api/registrations")
        .json(&json!({
            "registration": form,
            "body_evaluation": {
                "date": "2025-01-06",
                "height_cm": "170",
                "weight_kg": "70",
                "visceral_fat": "8",
                "body_fat_women": "26"
            }
        }))
        .send(router)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["registration"]["gender"], "Other");
    let evaluation = &body["body_evaluation"];
    assert_eq!(evaluation["analysis_data"]["targets"]["body_fat"], 25);
    assert_eq!(evaluation["analysis_data"]["targets"]["skeletal_muscle"], 30);
    assert_eq!(evaluation["fat"], 0.7);
    assert_eq!(evaluation["fluids"], 2.8);
}

#[tokio::test]
async fn test_register_rejects_readings_beyond_column_precision() {
    let (router, resources) = create_test_router().await.unwrap();

    for (field, value) in [("weight_kg", "70.123"), ("height_cm", "12345678")] {
        let mut evaluation = lean_evaluation();
        evaluation[field] = json!(value);

        let body: Value = AxumTestRequest::post("/api/registrations")
            .json(&json!({
                "registration": registration_form("Meera Nair", "9000000008"),
                "body_evaluation": evaluation
            }))
            .send(router.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();

        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["details"]["field"], field);
    }
    assert!(resources.database.members().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_returning_phone_updates_existing_member() {
    let (router, resources) = create_test_router().await.unwrap();

    let first: Value = AxumTestRequest::post("/api/registrations")
        .json(&registration_request("Sanjay Kumar", "9000000007"))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let member_id = first["member"]["id"].as_i64().unwrap();

    let mut form = registration_form("Sanjay K", "9000000007");
    form["membership"] = json!("TRIAL");
    form["initial_amount_paid"] = json!(500);
    let mut evaluation = lean_evaluation();
    evaluation["date"] = json!("2025-02-03");
    evaluation["weight_kg"] = json!("58.4");

    let second: Value = AxumTestRequest::post("/api/registrations")
        .json(&json!({ "registration": form, "body_evaluation": evaluation }))
        .send(router)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let member = &second["member"];
    assert_eq!(member["id"].as_i64().unwrap(), member_id);
    assert_eq!(member["full_name"], "Sanjay Kumar");
    assert_eq!(member["membership"], "TRIAL");
    assert_eq!(member["membership_total_sessions"], 3);
    assert_eq!(member["ums_count"], 1);
    assert_eq!(member["total_paid"], 2500.0);
    assert_eq!(member["balance"], -1800.0);
    assert_eq!(member["latest_weight"], 58.4);
    assert_eq!(member["body_evaluations"].as_array().unwrap().len(), 2);
    assert_eq!(member["body_evaluations"][0]["date"], "2025-02-03");
    assert_eq!(second["registration"]["id"], first["registration"]["id"]);

    assert_eq!(resources.database.members().list().await.unwrap().len(), 1);
    assert_eq!(resources.database.payments().list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_registration() {
    let (router, _resources) = create_test_router().await.unwrap();

    let created: Value = AxumTestRequest::post("/api/registrations")
        .json(&registration_request("Meera Iyer", "9000000008"))
        .send(router.clone())
        .await
        .json();
    let id = created["registration"]["id"].as_i64().unwrap();

    let fetched: Value = AxumTestRequest::get(&format!("/api/registrations/{id}"))
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched["guest_name"], "Meera Iyer");
    assert_eq!(fetched["gender"], "Male");

    AxumTestRequest::get("/api/registrations/9999")
        .send(router)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
