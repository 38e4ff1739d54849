use actix_web::web::ServiceConfig;

mod group;
mod health;
mod meeting;
mod user;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.configure(meeting::configure)
        .configure(user::configure)
        .configure(group::configure)
        .configure(health::configure);
}
