pub mod confirmations;
pub mod events;
pub mod health;
pub mod repairs;
pub mod whatsapp;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health));

    // ── Repair routes ──
    cfg.service(
        web::scope("/repairs")
            .route("", web::get().to(repairs::get_repairs))
            .route("", web::post().to(repairs::create_repair))
            .route("/{id}", web::get().to(repairs::get_repair))
            .route("/{id}/details", web::put().to(repairs::update_details))
            .route("/{id}/status", web::put().to(repairs::update_status))
            .route("/{id}/costs", web::put().to(repairs::update_costs))
            .route("/{id}/warranty", web::put().to(repairs::update_warranty))
            .route("/{id}/parts", web::post().to(repairs::add_part))
            .route("/{id}/parts/{index}", web::delete().to(repairs::remove_part))
            .route("/{id}/history", web::get().to(repairs::get_history))
            .route("/{id}/message", web::get().to(whatsapp::get_status_message))
            .route(
                "/{id}/history-message",
                web::get().to(whatsapp::get_history_message),
            )
            // Guarded actions: request a ticket, then confirm it.
            .route("/{id}/unlock", web::post().to(confirmations::request_unlock))
            .route(
                "/{id}/unlock/confirm",
                web::post().to(confirmations::confirm_unlock),
            )
            .route("/{id}/delete", web::post().to(confirmations::request_delete))
            .route(
                "/{id}/delete/confirm",
                web::post().to(confirmations::confirm_delete),
            ),
    );
    cfg.route(
        "/confirmations/{ticket}/cancel",
        web::post().to(confirmations::cancel),
    );

    // ── WhatsApp template routes ──
    cfg.service(
        web::scope("/whatsapp-templates")
            .route("", web::get().to(whatsapp::get_templates))
            .route("/{status}", web::put().to(whatsapp::update_template)),
    );

    // ── Event feed ──
    cfg.route("/events/ws", web::get().to(events::ws_connect));
}
