use actix_web::web::*;

use crate::handlers::user;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/user")
            .route("/create", post().to(user::create))
            .route("/get/{user_id}", get().to(user::get))
            .route("/get-all", get().to(user::get_all)),
    );
}
