pub mod group;
pub mod health;
pub mod meeting;
pub mod user;

pub mod error {
    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, HttpResponseBuilder};
    use serde::Serialize;
    use std::fmt;

    #[derive(Serialize)]
    struct ErrorBody {
        message: &'static str,
    }

    #[derive(Debug)]
    pub enum HttpErrorResponse {
        // 400
        IncorrectlyFormed(&'static str),
        ConflictWithExisting(&'static str),

        // 404
        DoesNotExist(&'static str),

        // 500
        InternalError(&'static str),
    }

    impl std::error::Error for HttpErrorResponse {}

    impl fmt::Display for HttpErrorResponse {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                HttpErrorResponse::IncorrectlyFormed(msg) => {
                    write!(f, "Incorrectly formed request: {msg}")
                }
                HttpErrorResponse::ConflictWithExisting(msg) => {
                    write!(f, "Conflict with existing data: {msg}")
                }
                HttpErrorResponse::DoesNotExist(msg) => write!(f, "Does not exist: {msg}"),
                HttpErrorResponse::InternalError(msg) => write!(f, "Internal error: {msg}"),
            }
        }
    }

    impl actix_web::error::ResponseError for HttpErrorResponse {
        fn error_response(&self) -> HttpResponse {
            let message = match self {
                HttpErrorResponse::IncorrectlyFormed(msg)
                | HttpErrorResponse::ConflictWithExisting(msg)
                | HttpErrorResponse::DoesNotExist(msg)
                | HttpErrorResponse::InternalError(msg) => msg,
            };

            HttpResponseBuilder::new(self.status_code()).json(ErrorBody { message })
        }

        fn status_code(&self) -> StatusCode {
            match *self {
                HttpErrorResponse::IncorrectlyFormed(_)
                | HttpErrorResponse::ConflictWithExisting(_) => StatusCode::BAD_REQUEST,
                HttpErrorResponse::DoesNotExist(_) => StatusCode::NOT_FOUND,
                HttpErrorResponse::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl From<actix_web::error::BlockingError> for HttpErrorResponse {
        fn from(_err: actix_web::error::BlockingError) -> Self {
            HttpErrorResponse::InternalError("Actix thread pool failure")
        }
    }
}
