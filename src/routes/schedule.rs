use crate::handlers::schedule::{measure, nearby, slot};
use crate::models::schedule::{DistanceRequest, NearbyRequest, SlotRequest};
use actix_web::{HttpResponse, Responder, ResponseError, post, web};

#[post("/distance")]
async fn distance(body: web::Json<DistanceRequest>) -> impl Responder {
    HttpResponse::Ok().json(measure(&body))
}

#[post("/nearby")]
async fn nearby_points(body: web::Json<NearbyRequest>) -> impl Responder {
    match nearby(&body) {
        Ok(found) => HttpResponse::Ok().json(found),
        Err(e) => e.error_response(),
    }
}

#[post("/slot")]
async fn suggest_time(body: web::Json<SlotRequest>) -> impl Responder {
    match slot(&body) {
        Ok(suggested) => HttpResponse::Ok().json(suggested),
        Err(e) => e.error_response(),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(distance).service(nearby_points).service(suggest_time);
}
