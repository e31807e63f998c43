mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{call, empty_request, json_request, parcels_app};
use serde_json::{Value, json};
use uuid::Uuid;

async fn create(router: &axum::Router, name: &str, location: &str) -> Value {
    let (status, body) = call(
        router,
        json_request("POST", "/parcelas", &json!({ "name": name, "location": location })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    body
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_soft_delete_scenario() {
    let app = parcels_app();

    let parcel = create(&app.router, "North", "X").await;
    assert_eq!(parcel["deleted"], false);
    let id = parcel["id"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&id).is_ok());

    let (status, body) = call(&app.router, empty_request("DELETE", &format!("/parcelas/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"]["id"], id.as_str());
    assert_eq!(body["deleted"]["deleted"], true);
    assert_eq!(body["deleted"]["name"], "North");

    let (_, active) = call(&app.router, empty_request("GET", "/parcelas")).await;
    assert!(!ids(&active).contains(&id));

    let (_, deleted) = call(&app.router, empty_request("GET", "/parcelas/eliminadas")).await;
    assert_eq!(ids(&deleted), vec![id]);
}

#[tokio::test]
async fn test_delete_twice_succeeds_both_times() {
    let app = parcels_app();
    let parcel = create(&app.router, "South", "Y").await;
    let uri = format!("/parcelas/{}", parcel["id"].as_str().unwrap());

    let (first_status, first) = call(&app.router, empty_request("DELETE", &uri)).await;
    let (second_status, second) = call(&app.router, empty_request("DELETE", &uri)).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(second["deleted"]["deleted"], true);
}

#[tokio::test]
async fn test_delete_unknown_is_not_found_both_times() {
    let app = parcels_app();
    let uri = format!("/parcelas/{}", Uuid::new_v4());

    for _ in 0..2 {
        let (status, body) = call(&app.router, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");
    }

    let (status, _) = call(&app.router, empty_request("DELETE", "/parcelas/not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partition_completeness() {
    let app = parcels_app();

    let mut created = HashSet::new();
    for (i, name) in ["Olivos", "Agave", "Maíz", "Cacao", "Agave"].iter().enumerate() {
        let parcel = create(&app.router, name, "Valle").await;
        let id = parcel["id"].as_str().unwrap().to_string();
        if i % 2 == 1 {
            call(&app.router, empty_request("DELETE", &format!("/parcelas/{}", id))).await;
        }
        created.insert(id);
    }

    let (_, active) = call(&app.router, empty_request("GET", "/parcelas")).await;
    let (_, deleted) = call(&app.router, empty_request("GET", "/parcelas/eliminadas")).await;

    let active: HashSet<String> = ids(&active).into_iter().collect();
    let deleted: HashSet<String> = ids(&deleted).into_iter().collect();

    assert!(active.is_disjoint(&deleted));
    assert_eq!(&active | &deleted, created);
    assert_eq!(active.len(), 3);
}

#[tokio::test]
async fn test_active_listing_sorted_by_name() {
    let app = parcels_app();
    for name in ["Cacao", "Agave", "Bambú"] {
        create(&app.router, name, "Valle").await;
    }

    let (status, body) = call(&app.router, empty_request("GET", "/parcelas")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Agave", "Bambú", "Cacao"]);
}

#[tokio::test]
async fn test_caller_supplied_id() {
    let app = parcels_app();
    let id = Uuid::new_v4();
    let body = json!({ "id": id, "name": "East", "location": "Z" });

    let (status, parcel) = call(&app.router, json_request("POST", "/parcelas", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parcel["id"], id.to_string());

    let (status, error) = call(&app.router, json_request("POST", "/parcelas", &body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["kind"], "conflict");
}

#[tokio::test]
async fn test_create_rejects_blank_fields() {
    let app = parcels_app();
    let (status, body) = call(
        &app.router,
        json_request("POST", "/parcelas", &json!({ "name": "", "location": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "validation_error");

    let (_, active) = call(&app.router, empty_request("GET", "/parcelas")).await;
    assert!(active.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_store_outage() {
    let app = parcels_app();
    app.store.set_unavailable(true);

    let (status, body) = call(&app.router, empty_request("GET", "/parcelas")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "storage_unavailable");
}
