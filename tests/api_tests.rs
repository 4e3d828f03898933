use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use plastic_advisor::advisor::Advisor;
use plastic_advisor::advisor::rules::{LOW_GRADE_MESSAGE, LOW_GRADE_STATUS, LOW_GRADE_WARNING};
use plastic_advisor::catalog::{CatalogEntry, DuplicatePolicy, PlasticCatalog};
use plastic_advisor::plastic_api::{AppState, configure};
use serde_json::{Value, json};

fn fixture_state() -> web::Data<AppState> {
    let catalog = PlasticCatalog::from_entries(
        vec![
            CatalogEntry::new("bottle", 100.0),
            CatalogEntry::new("bag", 10.0),
        ],
        DuplicatePolicy::FirstWins,
    )
    .unwrap();
    web::Data::new(AppState::new(Advisor::new(catalog)))
}

async fn post_predict(state: web::Data<AppState>, body: Value) -> (StatusCode, Value) {
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn five_bottles_are_not_recommended() {
    let (status, body) = post_predict(fixture_state(), json!({"product": "bottle", "quantity": 5})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Manufacturing not recommended");
    assert_eq!(
        body["message"],
        "Plastic waste exceeds the threshold as per environmental regulations like the EU Waste Framework Directive!"
    );
    assert_eq!(body["suggestions"]["immediate_actions"].as_array().unwrap().len(), 3);
    assert_eq!(body["suggestions"]["cost_reduction"].as_array().unwrap().len(), 2);
    assert!(body.get("raw_material_warning").is_none());
}

#[actix_web::test]
async fn string_quantity_and_case_are_accepted() {
    let (status, body) = post_predict(fixture_state(), json!({"product": "Bottle", "quantity": "1"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Manufacturing approved with caution");
}

#[actix_web::test]
async fn boundary_waste_stays_in_lower_tier() {
    let (_, body) = post_predict(fixture_state(), json!({"product": "bag", "quantity": 40})).await;
    assert_eq!(body["status"], "Manufacturing allowed within safe limits");

    let (_, body) = post_predict(fixture_state(), json!({"product": "bag", "quantity": 5})).await;
    assert_eq!(body["status"], "Highly profitable manufacturing");
    assert!(body["suggestions"]["sustainability"].is_array());
}

#[actix_web::test]
async fn worst_material_alone_gives_single_warning() {
    let (status, body) = post_predict(
        fixture_state(),
        json!({"product": "", "quantity": 0, "raw_material": "worst"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "raw_material_warning": LOW_GRADE_WARNING }));
}

#[actix_web::test]
async fn low_grade_material_overrides_status() {
    let (_, body) = post_predict(
        fixture_state(),
        json!({"product": "bag", "quantity": 2, "raw_material": "average", "single_use": "yes"}),
    )
    .await;

    assert_eq!(body["status"], LOW_GRADE_STATUS);
    assert_eq!(body["message"], LOW_GRADE_MESSAGE);
    assert_eq!(body["raw_material_warning"], LOW_GRADE_WARNING);
    assert!(body["single_use_warning"].as_str().unwrap().starts_with("Single-use plastic is recommended"));
    assert!(body["suggestions"]["profit_suggestions"].is_array());
}

#[actix_web::test]
async fn empty_body_gives_empty_advice() {
    let (status, body) = post_predict(fixture_state(), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[actix_web::test]
async fn unknown_product_is_bad_request() {
    let (status, body) = post_predict(fixture_state(), json!({"product": "spoon", "quantity": 0})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Product not found in database" }));
}

#[actix_web::test]
async fn malformed_quantity_is_bad_request() {
    let (status, body) = post_predict(fixture_state(), json!({"product": "bottle", "quantity": "lots"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("lots"));
}

#[actix_web::test]
async fn unavailable_catalog_is_server_error() {
    let state = web::Data::new(AppState::new(Advisor::new(PlasticCatalog::Unavailable {
        reason: "no such file".into(),
    })));
    let (status, body) = post_predict(state, json!({"product": "bottle", "quantity": 1})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Plastic data not loaded" }));
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = test::init_service(App::new().app_data(fixture_state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/predict")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn probe_routes_respond() {
    let app = test::init_service(App::new().app_data(fixture_state()).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/predict").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "message": "Predict route is working!" }));
}
