//! End-to-end API tests against an in-memory database.

use axum_test::TestServer;
use chrono::Days;
use seatwise_server::{AppState, create_router};
use serde_json::{Value, json};
use uuid::Uuid;

async fn setup() -> TestServer {
    let db = surrealdb::engine::any::connect("mem://")
        .await
        .expect("failed to start in-memory db");
    db.use_ns("seatwise_test")
        .use_db("api")
        .await
        .expect("failed to select namespace");

    let state = AppState::new(db).await.expect("failed to build app state");
    TestServer::new(create_router(state)).expect("failed to build test server")
}

async fn create_team(server: &TestServer, name: &str) -> Uuid {
    let response = server
        .post("/api/teams")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    body["id"].as_str().unwrap().parse().unwrap()
}

fn license_payload(team_id: Uuid) -> Value {
    json!({
        "softwareName": "Zoom",
        "vendorName": "Zoom Inc",
        "teamId": team_id.to_string(),
        "licenseType": "subscription",
        "totalSeats": "25",
        "cost": "120.00",
        "billingFrequency": "monthly",
        "purchaseDate": "2023-06-01",
        "expiryDate": "2024-06-01",
        "contactPerson": "Dana",
    })
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let server = setup().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn teams_can_be_created_and_listed() {
    let server = setup().await;

    let response = server
        .post("/api/teams")
        .json(&json!({ "name": "Platform", "description": "Infra group" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let created: Value = response.json();
    assert_eq!(created["name"], "Platform");
    assert_eq!(created["description"], "Infra group");
    assert!(created["createdAt"].is_string());

    create_team(&server, "Design").await;

    let list: Vec<Value> = server.get("/api/teams").await.json();
    let names: Vec<&str> = list.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Design", "Platform"]);
}

#[tokio::test]
async fn team_without_name_is_rejected_with_field_errors() {
    let server = setup().await;

    let response = server
        .post("/api/teams")
        .json(&json!({ "description": "no name" }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["fields"][0]["field"], "name");
}

#[tokio::test]
async fn duplicate_team_name_conflicts() {
    let server = setup().await;
    create_team(&server, "Platform").await;

    let response = server
        .post("/api/teams")
        .json(&json!({ "name": "Platform" }))
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);

    let body: Value = response.json();
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn license_creation_resolves_vendor_by_name() {
    let server = setup().await;
    let team_id = create_team(&server, "Platform").await;

    let response = server
        .post("/api/licenses")
        .json(&license_payload(team_id))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let license: Value = response.json();
    assert_eq!(license["softwareName"], "Zoom");
    assert_eq!(license["status"], "active");
    assert_eq!(license["usedSeats"], 0);
    assert_eq!(license["cost"], "120.00");
    assert_eq!(license["teamId"], team_id.to_string());

    // The vendor was created as a side effect and is now listed.
    let vendors: Vec<Value> = server.get("/api/vendors").await.json();
    assert_eq!(vendors.len(), 1);
    assert_eq!(vendors[0]["name"], "Zoom Inc");
    assert_eq!(vendors[0]["id"], license["vendorId"]);

    // Reusing the vendor name does not create a second vendor.
    let response = server
        .post("/api/licenses")
        .json(&license_payload(team_id))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let vendors: Vec<Value> = server.get("/api/vendors").await.json();
    assert_eq!(vendors.len(), 1);
}

#[tokio::test]
async fn license_with_unknown_team_is_not_found() {
    let server = setup().await;

    let response = server
        .post("/api/licenses")
        .json(&license_payload(Uuid::new_v4()))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_license_payload_lists_every_bad_field() {
    let server = setup().await;

    let response = server.post("/api/licenses").json(&json!({})).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"softwareName"));
    assert!(fields.contains(&"vendorName"));
    assert!(fields.contains(&"cost"));
}

#[tokio::test]
async fn get_missing_license_is_not_found() {
    let server = setup().await;

    let response = server.get(&format!("/api/licenses/{}", Uuid::new_v4())).await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn license_can_be_fetched_and_updated() {
    let server = setup().await;
    let team_id = create_team(&server, "Platform").await;

    let created: Value = server
        .post("/api/licenses")
        .json(&license_payload(team_id))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let fetched: Value = server.get(&format!("/api/licenses/{id}")).await.json();
    assert_eq!(fetched["id"], created["id"]);

    let response = server
        .put(&format!("/api/licenses/{id}"))
        .json(&json!({ "usedSeats": "7", "status": "cancelled" }))
        .await;
    response.assert_status_ok();

    let updated: Value = response.json();
    assert_eq!(updated["usedSeats"], 7);
    assert_eq!(updated["status"], "cancelled");
    // Untouched fields survive the partial update.
    assert_eq!(updated["softwareName"], "Zoom");
    assert_eq!(updated["cost"], "120.00");
}

#[tokio::test]
async fn updating_missing_license_is_not_found() {
    let server = setup().await;

    let response = server
        .put(&format!("/api/licenses/{}", Uuid::new_v4()))
        .json(&json!({ "usedSeats": "3" }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let server = setup().await;
    let team_id = create_team(&server, "Platform").await;

    let created: Value = server
        .post("/api/licenses")
        .json(&license_payload(team_id))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let response = server.delete(&format!("/api/licenses/{id}")).await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    // Deleting again still succeeds.
    let response = server.delete(&format!("/api/licenses/{id}")).await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/licenses/{id}")).await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn licenses_can_be_filtered_by_query() {
    let server = setup().await;
    let platform = create_team(&server, "Platform").await;
    let design = create_team(&server, "Design").await;

    server
        .post("/api/licenses")
        .json(&license_payload(platform))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let mut figma = license_payload(design);
    figma["softwareName"] = json!("Figma");
    figma["vendorName"] = json!("Figma Inc");
    server
        .post("/api/licenses")
        .json(&figma)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let all: Vec<Value> = server.get("/api/licenses").await.json();
    assert_eq!(all.len(), 2);

    // Case-sensitive substring match on the software name.
    let hits: Vec<Value> = server.get("/api/licenses?search=Fig").await.json();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["softwareName"], "Figma");

    let hits: Vec<Value> = server.get("/api/licenses?search=fig").await.json();
    assert!(hits.is_empty());

    let hits: Vec<Value> = server
        .get(&format!("/api/licenses?teamId={platform}"))
        .await
        .json();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["softwareName"], "Zoom");

    let hits: Vec<Value> = server.get("/api/licenses?status=active").await.json();
    assert_eq!(hits.len(), 2);

    let response = server.get("/api/licenses?status=bogus").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn team_licenses_endpoint_scopes_to_one_team() {
    let server = setup().await;
    let platform = create_team(&server, "Platform").await;
    let design = create_team(&server, "Design").await;

    server
        .post("/api/licenses")
        .json(&license_payload(platform))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let licenses: Vec<Value> = server
        .get(&format!("/api/teams/{platform}/licenses"))
        .await
        .json();
    assert_eq!(licenses.len(), 1);

    let licenses: Vec<Value> = server
        .get(&format!("/api/teams/{design}/licenses"))
        .await
        .json();
    assert!(licenses.is_empty());
}

#[tokio::test]
async fn analytics_endpoints_aggregate_the_inventory() {
    let server = setup().await;
    let platform = create_team(&server, "Platform").await;
    let design = create_team(&server, "Design").await;

    let soon = chrono::Local::now()
        .date_naive()
        .checked_add_days(Days::new(10))
        .unwrap();

    // Same software on two teams, one expiring inside the window.
    let mut first = license_payload(platform);
    first["expiryDate"] = json!(soon.to_string());
    server
        .post("/api/licenses")
        .json(&first)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let mut second = license_payload(design);
    second["softwareName"] = json!("zoom");
    second["cost"] = json!("300.00");
    second["billingFrequency"] = json!("quarterly");
    second.as_object_mut().unwrap().remove("expiryDate");
    server
        .post("/api/licenses")
        .json(&second)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let metrics: Value = server.get("/api/analytics/metrics").await.json();
    assert_eq!(metrics["totalLicenses"], 2);
    assert_eq!(metrics["expiringSoon"], 1);
    // 120 monthly + 300 quarterly = 120 + 100.
    assert_eq!(metrics["monthlyCost"], 220);
    assert_eq!(metrics["utilizationRate"], 0);

    let duplicates: Vec<Value> = server.get("/api/analytics/duplicates").await.json();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0]["licenses"].as_array().unwrap().len(), 2);

    let expiring: Vec<Value> = server.get("/api/analytics/expiring").await.json();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0]["expiryDate"], soon.to_string());

    // A wider window picks up nothing extra; a zero-day window is empty.
    let expiring: Vec<Value> = server.get("/api/analytics/expiring?days=365").await.json();
    assert_eq!(expiring.len(), 1);

    let expiring: Vec<Value> = server.get("/api/analytics/expiring?days=0").await.json();
    assert!(expiring.is_empty());
}
