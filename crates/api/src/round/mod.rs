mod bulk_transition_round_status;
mod create_round;
mod get_round;
mod transition_round_status;

use actix_web::web;
use bulk_transition_round_status::bulk_transition_round_status_controller;
use create_round::create_round_controller;
use get_round::get_round_controller;
use transition_round_status::transition_round_status_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/rounds", web::post().to(create_round_controller));
    // Registered before `/rounds/{round_id}` routes so `status` is not taken for an id
    cfg.route(
        "/rounds/status",
        web::post().to(bulk_transition_round_status_controller),
    );
    cfg.route("/rounds/{round_id}", web::get().to(get_round_controller));
    cfg.route(
        "/rounds/{round_id}/status",
        web::put().to(transition_round_status_controller),
    );
}
