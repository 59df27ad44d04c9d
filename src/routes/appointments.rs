use crate::handlers::appointments::{delete_appointment, update_appointment};
use crate::models::appointment::AppointmentPatch;
use crate::state::AppState;
use actix_web::{HttpResponse, Responder, ResponseError, delete, patch, web};

#[patch("/{id}")]
async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<AppointmentPatch>,
) -> impl Responder {
    let id = path.into_inner();

    match update_appointment(&state, &id, body.into_inner()).await {
        Ok(appointment) => HttpResponse::Ok().json(appointment),
        Err(e) => e.error_response(),
    }
}

#[delete("/{id}")]
async fn remove(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match delete_appointment(&state, &id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(update).service(remove);
}
