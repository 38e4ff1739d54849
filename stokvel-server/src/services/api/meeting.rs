use actix_web::web::*;

use crate::handlers::meeting;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/meeting")
            .route("/create-meeting", post().to(meeting::create))
            .route("/get-meetings", get().to(meeting::get))
            .route("/update-invite-status", put().to(meeting::update_invite_status))
            .route("/cancel-meeting/{meeting_id}", put().to(meeting::cancel))
            .route("/delete-meeting/{meeting_id}", delete().to(meeting::delete))
            .route("/series/{group_id}", delete().to(meeting::delete_series)),
    );
}
