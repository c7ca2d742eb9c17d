use actix_web::web;

mod consume_action_token;

use consume_action_token::consume_action_token_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/email-actions/{token}",
        web::get().to(consume_action_token_controller),
    );
}
