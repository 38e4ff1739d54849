use actix_web::{web, HttpResponse};

use stokvel_common::db::{self, DaoError, DbThreadPool};
use stokvel_common::request_io::{InputUser, OutputUser, OutputUserId};

use crate::handlers::error::HttpErrorResponse;

pub async fn create(
    db_thread_pool: web::Data<DbThreadPool>,
    user_data: web::Json<InputUser>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let user_id = match web::block(move || {
        let user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao.create_user(
            &user_data.name,
            &user_data.surname,
            &user_data.email,
            &user_data.phone_number,
            user_data.profile_image_url.as_deref(),
            user_data.language_preference.as_deref().unwrap_or("English"),
        )
    })
    .await?
    {
        Ok(id) => id,
        Err(DaoError::QueryFailure(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        ))) => {
            return Err(HttpErrorResponse::ConflictWithExisting(
                "A user with that email already exists",
            ));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to create user"));
        }
    };

    Ok(HttpResponse::Ok().json(OutputUserId {
        message: "User created successfully",
        user_id,
    }))
}

pub async fn get(
    db_thread_pool: web::Data<DbThreadPool>,
    user_id: web::Path<i32>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let user_id = user_id.into_inner();

    let user = match web::block(move || {
        let user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao.get_user(user_id)
    })
    .await?
    {
        Ok(u) => u,
        Err(DaoError::QueryFailure(diesel::result::Error::NotFound)) => {
            return Err(HttpErrorResponse::DoesNotExist("User not found"));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to get user"));
        }
    };

    Ok(HttpResponse::Ok().json(OutputUser::from(user)))
}

pub async fn get_all(
    db_thread_pool: web::Data<DbThreadPool>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let users = match web::block(move || {
        let user_dao = db::user::Dao::new(&db_thread_pool);
        user_dao.get_all_users()
    })
    .await?
    {
        Ok(u) => u,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to get users"));
        }
    };

    let user_dtos = users.into_iter().map(OutputUser::from).collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(user_dtos))
}

#[cfg(test)]
mod tests {
    use crate::env;

    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::web::Data;
    use actix_web::App;
    use serde_json::{json, Value};

    fn unique_email(tag: &str) -> String {
        format!("user-handler-{tag}-{}@stokvel.test", std::process::id())
    }

    #[actix_web::test]
    async fn create_then_get_user() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(crate::services::api::configure),
        )
        .await;

        let email = unique_email("create-get");
        let req = TestRequest::post()
            .uri("/user/create")
            .set_json(json!({
                "name": "Naledi",
                "surname": "Mokoena",
                "email": email,
                "phoneNumber": "0821234567",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let created: Value = serde_json::from_slice(&bytes).unwrap();
        let user_id = created["userId"].as_i64().unwrap();

        let req = TestRequest::get()
            .uri(&format!("/user/get/{user_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let fetched: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(fetched["email"], email.as_str());
        assert_eq!(fetched["languagePreference"], "English");
    }

    #[actix_web::test]
    async fn duplicate_email_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(crate::services::api::configure),
        )
        .await;

        let email = unique_email("duplicate");
        let body = json!({
            "name": "Naledi",
            "surname": "Mokoena",
            "email": email,
            "phoneNumber": "0821234567",
        });

        let req = TestRequest::post()
            .uri("/user/create")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = TestRequest::post()
            .uri("/user/create")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn get_unknown_user_returns_404() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                .configure(crate::services::api::configure),
        )
        .await;

        let req = TestRequest::get().uri("/user/get/-1").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
