use actix_cors::Cors;
use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::header,
    web, HttpRequest, HttpResponse,
};

use crate::{
    email::Mailer,
    handlers::{home::home, system::health_check},
};

mod contact;

pub fn configure_routes<M>(cfg: &mut web::ServiceConfig)
where
    M: Mailer + 'static,
{
    cfg.app_data(web::JsonConfig::default().error_handler(json_payload_error));

    cfg.service(home);
    cfg.service(health_check);

    cfg.configure(contact::config_routes::<M>);
}

/// Malformed request bodies get the same `{error}` JSON envelope the
/// pipeline errors use, instead of actix's plain-text default.
fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = HttpResponse::BadRequest()
        .json(serde_json::json!({ "error": format!("JSON payload error: {err}") }));
    InternalError::from_response(err, body).into()
}

/// CORS policy for the contact endpoint: the site's own origin(s) only,
/// POST plus preflight, JSON content type. A "*" entry (development
/// default; refused by config validation in production) falls back to
/// the permissive policy.
pub fn cors_for(origins: &[String]) -> Cors {
    if origins.iter().any(|o| o == "*") {
        return Cors::permissive();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE])
        .max_age(86_400);
    for origin in origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}
