use crate::handlers::appointments::{create_appointment, list_appointments};
use crate::handlers::suggestions::suggest;
use crate::models::appointment::NewAppointment;
use crate::models::schedule::SuggestionRequest;
use crate::state::AppState;
use actix_web::{HttpResponse, Responder, ResponseError, get, post, web};

#[get("/{rep_id}/appointments")]
async fn list(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let rep_id = path.into_inner();

    match list_appointments(&state, &rep_id).await {
        Ok(appointments) => HttpResponse::Ok().json(appointments),
        Err(e) => e.error_response(),
    }
}

#[post("/{rep_id}/appointments")]
async fn create(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NewAppointment>,
) -> impl Responder {
    let rep_id = path.into_inner();

    match create_appointment(&state, &rep_id, body.into_inner()).await {
        Ok(appointment) => HttpResponse::Created().json(appointment),
        Err(e) => e.error_response(),
    }
}

#[post("/{rep_id}/suggestions")]
async fn suggestions(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SuggestionRequest>,
) -> impl Responder {
    let rep_id = path.into_inner();

    match suggest(&state, &rep_id, body.into_inner()).await {
        Ok(recommendation) => HttpResponse::Ok().json(recommendation),
        Err(e) => e.error_response(),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(list).service(create).service(suggestions);
}
