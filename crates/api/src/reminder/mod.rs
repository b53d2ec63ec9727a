mod dispatcher;
mod eligibility;
mod get_dispatch_log;
mod get_upcoming_reminders;
mod ledger;
pub mod run_reminder_pass;

use actix_web::web;
use get_dispatch_log::get_dispatch_log_controller;
use get_upcoming_reminders::get_upcoming_reminders_controller;
use run_reminder_pass::run_reminder_pass_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/run",
        web::post().to(run_reminder_pass_controller),
    );
    cfg.route(
        "/reminders/upcoming",
        web::get().to(get_upcoming_reminders_controller),
    );
    cfg.route("/reminders/runs", web::get().to(get_dispatch_log_controller));
}
