use actix_web::web;

mod calendar_token;
mod get_calendar_feed;

use calendar_token::{get_calendar_token_controller, regenerate_calendar_token_controller};
use get_calendar_feed::get_calendar_feed_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/calendar/feed", web::get().to(get_calendar_feed_controller));

    cfg.route(
        "/calendar/token",
        web::get().to(get_calendar_token_controller),
    );
    cfg.route(
        "/calendar/token/regenerate",
        web::post().to(regenerate_calendar_token_controller),
    );
}
