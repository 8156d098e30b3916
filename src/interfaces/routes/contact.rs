use actix_web::web;

use crate::{email::Mailer, handlers::contact::create_contact};

pub fn config_routes<M>(cfg: &mut web::ServiceConfig)
where
    M: Mailer + 'static,
{
    cfg.route("/contact", web::post().to(create_contact::<M>));
}
