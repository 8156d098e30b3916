use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Montana Finish Carpenter contact API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
