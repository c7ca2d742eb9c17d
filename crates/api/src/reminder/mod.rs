use actix_web::web;

mod create_reminder;
mod delete_reminder;
mod get_reminder;
mod get_reminder_history;
mod get_reminders;
mod get_snoozed_reminders;
pub mod resolve_reminder;
mod snooze_reminder;
mod unresolve_reminder;
mod update_reminder;

use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminder_history::get_reminder_history_controller;
use get_reminders::get_reminders_controller;
use get_snoozed_reminders::get_snoozed_reminders_controller;
use resolve_reminder::{complete_reminder_controller, ignore_reminder_controller};
use snooze_reminder::{snooze_reminder_controller, unsnooze_reminder_controller};
use unresolve_reminder::{uncomplete_reminder_controller, unignore_reminder_controller};
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));

    cfg.route(
        "/reminders/snoozed",
        web::get().to(get_snoozed_reminders_controller),
    );
    cfg.route(
        "/reminders/history",
        web::get().to(get_reminder_history_controller),
    );

    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );

    cfg.route(
        "/reminders/{reminder_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/unsnooze",
        web::post().to(unsnooze_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/ignore",
        web::post().to(ignore_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/unignore",
        web::post().to(unignore_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/complete",
        web::post().to(complete_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/uncomplete",
        web::post().to(uncomplete_reminder_controller),
    );
}
