use crate::advisor::AdvisoryRequest;
use crate::plastic_api::server_api::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;

pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Plastic advisor is working!")
}

pub async fn predict_probe() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Predict route is working!" }))
}

pub async fn predict(state: web::Data<AppState>, payload: web::Json<AdvisoryRequest>) -> HttpResponse {
    state.advise(&payload.into_inner())
}
