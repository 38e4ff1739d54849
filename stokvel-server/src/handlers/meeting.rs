use actix_web::{web, HttpResponse};
use std::str::FromStr;

use stokvel_common::db::meeting::{MeetingDetails, MeetingFilters};
use stokvel_common::db::{self, DaoError, DbThreadPool};
use stokvel_common::models::meeting::MeetingStatus;
use stokvel_common::models::meeting_user::InviteStatus;
use stokvel_common::request_io::{
    InputInviteStatusUpdate, InputMeeting, InputMeetingFilters, OutputMeeting, OutputMeetingId,
    OutputMessage, OutputSeriesDeleted,
};

use crate::handlers::error::HttpErrorResponse;

pub async fn create(
    db_thread_pool: web::Data<DbThreadPool>,
    meeting_data: web::Json<InputMeeting>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let meeting_data = meeting_data.into_inner();

    if meeting_data.end < meeting_data.start {
        return Err(HttpErrorResponse::IncorrectlyFormed(
            "Meeting end must not precede its start",
        ));
    }

    let meeting_id = match web::block(move || {
        let details = MeetingDetails {
            title: &meeting_data.title,
            agenda: meeting_data.agenda.as_deref(),
            organizer_id: meeting_data.organizer.id,
            start_datetime: meeting_data.start,
            end_datetime: meeting_data.end,
            recurrence: meeting_data.recurrence.as_deref().unwrap_or("None"),
            recurrence_end_date: meeting_data.recurrence_end_date,
            recurrence_group_id: meeting_data.recurrence_group_id.as_deref(),
            location: meeting_data.location.as_deref(),
            notes: meeting_data.notes.as_deref(),
        };

        let meeting_dao = db::meeting::Dao::new(&db_thread_pool);
        meeting_dao.create_meeting(&details, meeting_data.invited_user_ids.as_deref())
    })
    .await?
    {
        Ok(id) => id,
        Err(DaoError::QueryFailure(diesel::result::Error::NotFound)) => {
            return Err(HttpErrorResponse::DoesNotExist("Organizer not found"));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to create meeting"));
        }
    };

    Ok(HttpResponse::Ok().json(OutputMeetingId {
        message: "Meeting created successfully",
        meeting_id,
    }))
}

pub async fn get(
    db_thread_pool: web::Data<DbThreadPool>,
    filters: web::Query<InputMeetingFilters>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let filters = filters.into_inner();

    // Stored statuses are canonical, so a status value outside the
    // known set can match nothing
    let status = match filters.status.as_deref() {
        Some(status_str) => match MeetingStatus::from_str(status_str) {
            Ok(parsed) => Some(parsed),
            Err(_) => return Ok(HttpResponse::Ok().json(Vec::<OutputMeeting>::new())),
        },
        None => None,
    };

    // An unparseable user id drops the filter rather than rejecting
    // the request
    let user_id = filters
        .user_id
        .as_deref()
        .and_then(|id| id.parse::<i32>().ok());

    let dao_filters = MeetingFilters {
        user_id,
        status,
        date_from: filters.date_from,
        date_to: filters.date_to,
    };

    let meetings = match web::block(move || {
        let meeting_dao = db::meeting::Dao::new(&db_thread_pool);
        meeting_dao.get_meetings(dao_filters)
    })
    .await?
    {
        Ok(m) => m,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to get meetings"));
        }
    };

    let meeting_dtos = meetings
        .into_iter()
        .map(OutputMeeting::from)
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(meeting_dtos))
}

pub async fn update_invite_status(
    db_thread_pool: web::Data<DbThreadPool>,
    update_data: web::Json<InputInviteStatusUpdate>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let update_data = update_data.into_inner();
    let parsed_status = InviteStatus::from_str(&update_data.invite_status);

    // The invite row is looked up before the status value is validated,
    // so a missing (meeting, user) pair reports 404 even when the
    // status string is unrecognized
    let status_recognized = match web::block(move || {
        let meeting_dao = db::meeting::Dao::new(&db_thread_pool);

        match parsed_status {
            Ok(status) => meeting_dao
                .update_invite_status(update_data.meeting_id, update_data.user_id, status)
                .map(|()| true),
            Err(_) => meeting_dao
                .invite_exists(update_data.meeting_id, update_data.user_id)
                .and_then(|exists| {
                    if exists {
                        Ok(false)
                    } else {
                        Err(DaoError::QueryFailure(diesel::result::Error::NotFound))
                    }
                }),
        }
    })
    .await?
    {
        Ok(recognized) => recognized,
        Err(DaoError::QueryFailure(diesel::result::Error::NotFound)) => {
            return Err(HttpErrorResponse::DoesNotExist("User not found in meeting"));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(
                "Failed to update invite status",
            ));
        }
    };

    if !status_recognized {
        return Err(HttpErrorResponse::IncorrectlyFormed("Invalid invite status"));
    }

    Ok(HttpResponse::Ok().json(OutputMessage {
        message: "Invite status updated successfully",
    }))
}

pub async fn cancel(
    db_thread_pool: web::Data<DbThreadPool>,
    meeting_id: web::Path<i32>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let meeting_id = meeting_id.into_inner();

    match web::block(move || {
        let meeting_dao = db::meeting::Dao::new(&db_thread_pool);
        meeting_dao.cancel_meeting(meeting_id)
    })
    .await?
    {
        Ok(()) => (),
        Err(DaoError::QueryFailure(diesel::result::Error::NotFound)) => {
            return Err(HttpErrorResponse::DoesNotExist("Meeting not found"));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to cancel meeting"));
        }
    };

    Ok(HttpResponse::Ok().json(OutputMessage {
        message: "Meeting cancelled successfully",
    }))
}

pub async fn delete(
    db_thread_pool: web::Data<DbThreadPool>,
    meeting_id: web::Path<i32>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let meeting_id = meeting_id.into_inner();

    match web::block(move || {
        let meeting_dao = db::meeting::Dao::new(&db_thread_pool);
        meeting_dao.delete_meeting(meeting_id)
    })
    .await?
    {
        Ok(()) => (),
        Err(DaoError::QueryFailure(diesel::result::Error::NotFound)) => {
            return Err(HttpErrorResponse::DoesNotExist("Meeting not found"));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to delete meeting"));
        }
    };

    Ok(HttpResponse::Ok().json(OutputMessage {
        message: "Meeting deleted successfully",
    }))
}

pub async fn delete_series(
    db_thread_pool: web::Data<DbThreadPool>,
    group_id: web::Path<String>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let group_id = group_id.into_inner();

    if group_id.trim().is_empty() {
        return Err(HttpErrorResponse::IncorrectlyFormed(
            "Invalid recurrence group id",
        ));
    }

    let deleted = match web::block(move || {
        let meeting_dao = db::meeting::Dao::new(&db_thread_pool);
        meeting_dao.delete_series(&group_id)
    })
    .await?
    {
        Ok(d) => d,
        Err(DaoError::QueryFailure(diesel::result::Error::NotFound)) => {
            return Err(HttpErrorResponse::DoesNotExist(
                "No meetings found for this recurrence group",
            ));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(
                "Failed to delete meeting series",
            ));
        }
    };

    log::info!(
        "Deleted {} occurrence(s) of series \"{}\" ({}, {} to {})",
        deleted.deleted_count,
        deleted.title,
        deleted.recurrence,
        deleted.range_start,
        deleted.range_end,
    );

    Ok(HttpResponse::Ok().json(OutputSeriesDeleted {
        message: "Meeting series deleted",
        deleted_count: deleted.deleted_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env;

    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::web::Data;
    use actix_web::App;
    use diesel::{QueryDsl, RunQueryDsl};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicU32, Ordering};

    use stokvel_common::models::meeting_user::MeetingUser;
    use stokvel_common::schema::meeting_users::dsl::meeting_users;

    static USER_NUMBER: AtomicU32 = AtomicU32::new(0);

    fn create_test_user(name: &str) -> i32 {
        let user_number = USER_NUMBER.fetch_add(1, Ordering::SeqCst);
        let email = format!(
            "handler-test-{}-{user_number}@stokvel.test",
            std::process::id()
        );

        let user_dao = db::user::Dao::new(&env::testing::DB_THREAD_POOL);
        user_dao
            .create_user(name, "Tester", &email, "0830000000", None, "English")
            .expect("Failed to create test user")
    }

    fn meeting_body(organizer_id: i32, invitee_ids: &[i32]) -> Value {
        json!({
            "title": "Handler test meeting",
            "agenda": "Testing",
            "organizer": { "id": organizer_id },
            "start": "2026-10-01T10:00:00",
            "end": "2026-10-01T11:00:00",
            "invitedUserIds": invitee_ids,
        })
    }

    async fn body_json(resp: actix_web::dev::ServiceResponse) -> Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(Data::new(env::testing::DB_THREAD_POOL.clone()))
                    .configure(crate::services::api::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_meeting_returns_404_for_unknown_organizer() {
        let app = test_app!();

        let req = TestRequest::post()
            .uri("/meeting/create-meeting")
            .set_json(meeting_body(-1, &[]))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_meeting_rejects_end_before_start() {
        let app = test_app!();
        let organizer_id = create_test_user("Thandi");

        let mut body = meeting_body(organizer_id, &[]);
        body["start"] = json!("2026-10-01T11:00:00");
        body["end"] = json!("2026-10-01T10:00:00");

        let req = TestRequest::post()
            .uri("/meeting/create-meeting")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_list_and_delete_meeting() {
        let app = test_app!();
        let organizer_id = create_test_user("Thandi");
        let invitee_id = create_test_user("Sipho");

        let req = TestRequest::post()
            .uri("/meeting/create-meeting")
            .set_json(meeting_body(organizer_id, &[invitee_id]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let created = body_json(resp).await;
        let meeting_id = created["meetingId"].as_i64().unwrap();

        let req = TestRequest::get()
            .uri(&format!("/meeting/get-meetings?userId={invitee_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let listed = body_json(resp).await;
        let listed_meeting = listed
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["id"].as_i64() == Some(meeting_id))
            .expect("Created meeting missing from listing");

        assert_eq!(listed_meeting["status"], "Scheduled");
        assert_eq!(listed_meeting["organizer"]["id"].as_i64().unwrap(), i64::from(organizer_id));

        let invited_users = listed_meeting["invitedUsers"].as_array().unwrap();
        assert_eq!(invited_users.len(), 2);
        for invited_user in invited_users {
            let expected_status = if invited_user["id"].as_i64() == Some(i64::from(organizer_id)) {
                "Accepted"
            } else {
                "Pending"
            };
            assert_eq!(invited_user["inviteStatus"], expected_status);
        }

        let req = TestRequest::delete()
            .uri(&format!("/meeting/delete-meeting/{meeting_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = TestRequest::delete()
            .uri(&format!("/meeting/delete-meeting/{meeting_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_invite_status_accepts_known_and_rejects_unknown_values() {
        let app = test_app!();
        let organizer_id = create_test_user("Thandi");
        let invitee_id = create_test_user("Sipho");

        let req = TestRequest::post()
            .uri("/meeting/create-meeting")
            .set_json(meeting_body(organizer_id, &[invitee_id]))
            .to_request();
        let created = body_json(test::call_service(&app, req).await).await;
        let meeting_id = created["meetingId"].as_i64().unwrap();

        let req = TestRequest::put()
            .uri("/meeting/update-invite-status")
            .set_json(json!({
                "meetingId": meeting_id,
                "userId": invitee_id,
                "inviteStatus": "accepted",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = TestRequest::put()
            .uri("/meeting/update-invite-status")
            .set_json(json!({
                "meetingId": meeting_id,
                "userId": invitee_id,
                "inviteStatus": "Maybe",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // The rejected update must not have mutated the row
        let row = meeting_users
            .find((meeting_id as i32, invitee_id))
            .get_result::<MeetingUser>(&mut env::testing::DB_THREAD_POOL.get().unwrap())
            .unwrap();
        assert_eq!(row.invite_status, InviteStatus::Accepted);

        let req = TestRequest::put()
            .uri("/meeting/update-invite-status")
            .set_json(json!({
                "meetingId": meeting_id,
                "userId": -1,
                "inviteStatus": "Declined",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::delete()
            .uri(&format!("/meeting/delete-meeting/{meeting_id}"))
            .to_request();
        test::call_service(&app, req).await;
    }

    #[actix_web::test]
    async fn update_invite_status_reports_missing_row_before_bad_status() {
        let app = test_app!();
        let organizer_id = create_test_user("Thandi");

        let req = TestRequest::post()
            .uri("/meeting/create-meeting")
            .set_json(meeting_body(organizer_id, &[]))
            .to_request();
        let created = body_json(test::call_service(&app, req).await).await;
        let meeting_id = created["meetingId"].as_i64().unwrap();

        // Unknown status string, but the row is missing too
        let req = TestRequest::put()
            .uri("/meeting/update-invite-status")
            .set_json(json!({
                "meetingId": meeting_id,
                "userId": -1,
                "inviteStatus": "Maybe",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::put()
            .uri("/meeting/update-invite-status")
            .set_json(json!({
                "meetingId": -1,
                "userId": organizer_id,
                "inviteStatus": "Maybe",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::delete()
            .uri(&format!("/meeting/delete-meeting/{meeting_id}"))
            .to_request();
        test::call_service(&app, req).await;
    }

    #[actix_web::test]
    async fn cancel_meeting_is_idempotent() {
        let app = test_app!();
        let organizer_id = create_test_user("Thandi");

        let req = TestRequest::post()
            .uri("/meeting/create-meeting")
            .set_json(meeting_body(organizer_id, &[]))
            .to_request();
        let created = body_json(test::call_service(&app, req).await).await;
        let meeting_id = created["meetingId"].as_i64().unwrap();

        for _ in 0..2 {
            let req = TestRequest::put()
                .uri(&format!("/meeting/cancel-meeting/{meeting_id}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = TestRequest::get()
            .uri(&format!(
                "/meeting/get-meetings?userId={organizer_id}&status=cancelled"
            ))
            .to_request();
        let listed = body_json(test::call_service(&app, req).await).await;
        assert!(listed
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m["id"].as_i64() == Some(meeting_id)));

        let req = TestRequest::delete()
            .uri(&format!("/meeting/delete-meeting/{meeting_id}"))
            .to_request();
        test::call_service(&app, req).await;
    }

    #[actix_web::test]
    async fn cancel_meeting_returns_404_for_unknown_id() {
        let app = test_app!();

        let req = TestRequest::put()
            .uri("/meeting/cancel-meeting/-1")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_series_removes_all_occurrences() {
        let app = test_app!();
        let organizer_id = create_test_user("Thandi");

        let group_id = format!(
            "grp-{}-{}",
            std::process::id(),
            USER_NUMBER.fetch_add(1, Ordering::SeqCst)
        );

        for week in 0..2 {
            let mut body = meeting_body(organizer_id, &[]);
            body["recurrence"] = json!("Weekly");
            body["recurrenceGroupId"] = json!(group_id);
            body["start"] = json!(format!("2026-10-0{}T10:00:00", week + 1));
            body["end"] = json!(format!("2026-10-0{}T11:00:00", week + 1));

            let req = TestRequest::post()
                .uri("/meeting/create-meeting")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = TestRequest::delete()
            .uri(&format!("/meeting/series/{group_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let deleted = body_json(resp).await;
        assert_eq!(deleted["deletedCount"], 2);

        let req = TestRequest::delete()
            .uri(&format!("/meeting/series/{group_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_series_rejects_blank_group_id() {
        let app = test_app!();

        let req = TestRequest::delete()
            .uri("/meeting/series/%20%20")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
