pub mod appointments;
pub mod health;
pub mod reps;
pub mod schedule;

use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::init))
        .service(web::scope("/reps").configure(reps::init))
        .service(web::scope("/appointments").configure(appointments::init))
        .service(web::scope("/schedule").configure(schedule::init));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::rate_limiter::RateLimit;
    use crate::services::store::memory::InMemoryStore;
    use crate::state::AppState;
    use crate::testing::{FixedDriveTime, FixedGeocoder, at, generous_limits, state_with};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state() -> AppState {
        state_with(
            InMemoryStore::new(),
            FixedGeocoder::default().with("2000 Ross Ave, Dallas", at(32.7879, -96.799)),
            Arc::new(FixedDriveTime::minutes(6.0)),
            generous_limits(),
        )
    }

    fn akard() -> Value {
        json!({
            "name": "John Smith",
            "address": "400 S Akard St, Dallas, TX 75202",
            "location": {"lat": 32.7763, "lng": -96.7969},
            "date": "2026-01-17T10:00:00.000Z",
            "time": "10:00",
            "duration": 30,
            "notes": "Interested in solar panels"
        })
    }

    #[actix_web::test]
    async fn appointment_lifecycle() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(init),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/reps/rep-1/appointments")
            .set_json(akard())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["date"], "2026-01-17");
        assert_eq!(created["status"], "scheduled");
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::patch()
            .uri(&format!("/appointments/{id}"))
            .set_json(json!({"status": "completed", "time": "10:15"}))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], "completed");
        assert_eq!(updated["time"], "10:15");

        let req = test::TestRequest::get().uri("/reps/rep-1/appointments").to_request();
        let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], id.as_str());

        let req = test::TestRequest::delete()
            .uri(&format!("/appointments/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri(&format!("/appointments/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user_message"], "The appointment could not be found.");
    }

    #[actix_web::test]
    async fn invalid_appointment_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(init),
        )
        .await;

        let mut draft = akard();
        draft["name"] = json!("");
        draft["duration"] = json!(0);
        let req = test::TestRequest::post()
            .uri("/reps/rep-1/appointments")
            .set_json(draft)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["fields"][0]["field"], "name");
        assert_eq!(body["fields"][1]["field"], "duration");
    }

    #[actix_web::test]
    async fn writes_are_rate_limited() {
        let mut limits = generous_limits();
        limits.write = RateLimit::per_millis(1, 60_000);
        let state = state_with(
            InMemoryStore::new(),
            FixedGeocoder::default(),
            Arc::new(FixedDriveTime::minutes(1.0)),
            limits,
        );
        let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(init)).await;

        for expected in [StatusCode::CREATED, StatusCode::TOO_MANY_REQUESTS] {
            let req = test::TestRequest::post()
                .uri("/reps/rep-1/appointments")
                .set_json(akard())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn schedule_endpoints() {
        let app = test::init_service(App::new().configure(init)).await;

        let req = test::TestRequest::post()
            .uri("/schedule/slot")
            .set_json(json!({
                "appointments": [
                    {"date": "2026-01-17", "time": "09:00", "duration": 30},
                    {"date": "2026-01-17", "time": "10:00", "duration": 60},
                    {"date": "2026-01-18", "time": "09:30"}
                ],
                "target_date": "2026-01-17"
            }))
            .to_request();
        let slot: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(slot["time"], "09:30");

        let req = test::TestRequest::post()
            .uri("/schedule/distance")
            .set_json(json!({
                "from": {"lat": 0.0, "lng": 0.0},
                "to": {"lat": 1.0, "lng": 0.0}
            }))
            .to_request();
        let measured: Value = test::call_and_read_body_json(&app, req).await;
        let km = measured["kilometers"].as_f64().unwrap();
        let miles = measured["miles"].as_f64().unwrap();
        assert!((km - 111.195).abs() < 0.01);
        assert!((miles - km * 0.621371).abs() < 1e-9);

        let req = test::TestRequest::post()
            .uri("/schedule/nearby")
            .set_json(json!({
                "center": {"lat": 32.7763, "lng": -96.7969},
                "points": [
                    {"id": "ross", "lat": 32.7879, "lng": -96.799},
                    {"id": "fort-worth", "lat": 32.7555, "lng": -97.3308},
                    {"id": "akard", "lat": 32.7763, "lng": -96.7969}
                ]
            }))
            .to_request();
        let nearby: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<_> = nearby.iter().map(|n| n["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["akard", "ross"]);
    }

    #[actix_web::test]
    async fn bad_schedule_input_is_400() {
        let app = test::init_service(App::new().configure(init)).await;

        let req = test::TestRequest::post()
            .uri("/schedule/slot")
            .set_json(json!({"appointments": [], "target_date": "2026-01-17", "duration_minutes": 0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/schedule/distance")
            .set_json(json!({"from": {"lat": 91.0, "lng": 0.0}, "to": {"lat": 0.0, "lng": 0.0}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn suggestion_for_address() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(init),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/reps/rep-1/appointments")
            .set_json(akard())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/reps/rep-1/suggestions")
            .set_json(json!({"address": "2000 Ross Ave, Dallas", "unit": "km", "duration_minutes": 60}))
            .to_request();
        let rec: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rec["date"], "2026-01-17");
        // 09:00-10:00 fits before the 10:00 visit
        assert_eq!(rec["time"], "09:00");
        assert_eq!(rec["closest"][0]["name"], "John Smith");
        assert_eq!(rec["closest"][0]["drive_minutes"], 6.0);
        assert_eq!(rec["nearby"].as_array().unwrap().len(), 1);
        assert_eq!(
            rec["message"],
            "Sat, Jan 17 · near 1.3 km · 6 min drive · try 09:00"
        );

        let req = test::TestRequest::post()
            .uri("/reps/rep-1/suggestions")
            .set_json(json!({"address": "Unknown Road 1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
