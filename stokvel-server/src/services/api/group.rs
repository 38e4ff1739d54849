use actix_web::web::*;

use crate::handlers::group;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/group")
            .route("/create", post().to(group::create))
            .route("/add-member", post().to(group::add_member))
            .route("/members/{group_id}", get().to(group::members)),
    );
}
