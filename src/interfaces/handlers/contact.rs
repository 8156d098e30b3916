use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    email::Mailer,
    entities::contact::ContactForm,
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// POST /contact — the submission pipeline entry point. Admission
/// control runs first so a rate-limited client consumes nothing
/// downstream; everything after the gate lives in the use case.
pub async fn create_contact<M>(
    req: HttpRequest,
    state: web::Data<AppState<M>>,
    form: web::Json<ContactForm>,
) -> Result<HttpResponse, AppError>
where
    M: Mailer + 'static,
{
    let client_id = get_client_ip(&req, state.trust_x_forwarded_for);
    let decision = state.rate_limiter.check(state.max_requests, &client_id);
    if !decision.allowed {
        tracing::info!(%client_id, "submission rejected by rate limiter");
        return Err(AppError::RateLimited {
            retry_after_secs: decision.retry_after_secs(),
        });
    }

    let response = state.contact_handler.submit(form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
