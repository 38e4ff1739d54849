use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use stokvel_common::db::DbThreadPool;

pub async fn heartbeat() -> impl Responder {
    HttpResponse::Ok()
}

pub async fn health(db_thread_pool: web::Data<DbThreadPool>) -> impl Responder {
    let pool_state = db_thread_pool.state();
    let resp_body = json!({
        "db_pool_state": {
            "connections": pool_state.connections,
            "idle_connections": pool_state.idle_connections
        }
    });

    HttpResponse::Ok().json(resp_body)
}
