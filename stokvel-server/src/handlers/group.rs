use actix_web::{web, HttpResponse};

use stokvel_common::db::{self, DaoError, DbThreadPool};
use stokvel_common::request_io::{InputGroup, InputGroupMember, OutputGroupId, OutputGroupMember, OutputMessage};

use crate::handlers::error::HttpErrorResponse;

pub async fn create(
    db_thread_pool: web::Data<DbThreadPool>,
    group_data: web::Json<InputGroup>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let group_id = match web::block(move || {
        let group_dao = db::group::Dao::new(&db_thread_pool);
        group_dao.create_group(
            &group_data.group_name,
            group_data.description.as_deref().unwrap_or(""),
            group_data.stokvel_type.as_deref().unwrap_or("Savings"),
            group_data.monthly_contribution_cents.unwrap_or(0),
            group_data.created_by_user_id,
        )
    })
    .await?
    {
        Ok(id) => id,
        Err(DaoError::QueryFailure(diesel::result::Error::NotFound)) => {
            return Err(HttpErrorResponse::DoesNotExist("Creator not found"));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to create group"));
        }
    };

    Ok(HttpResponse::Ok().json(OutputGroupId {
        message: "Group created successfully",
        group_id,
    }))
}

pub async fn add_member(
    db_thread_pool: web::Data<DbThreadPool>,
    member_data: web::Json<InputGroupMember>,
) -> Result<HttpResponse, HttpErrorResponse> {
    match web::block(move || {
        let group_dao = db::group::Dao::new(&db_thread_pool);
        group_dao.add_member(
            member_data.group_id,
            member_data.user_id,
            member_data.role.as_deref().unwrap_or("Member"),
        )
    })
    .await?
    {
        Ok(()) => (),
        Err(DaoError::QueryFailure(diesel::result::Error::NotFound)) => {
            return Err(HttpErrorResponse::DoesNotExist("User or group not found"));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to add member"));
        }
    };

    Ok(HttpResponse::Ok().json(OutputMessage {
        message: "Member added successfully",
    }))
}

pub async fn members(
    db_thread_pool: web::Data<DbThreadPool>,
    group_id: web::Path<i32>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let group_id = group_id.into_inner();

    let members = match web::block(move || {
        let group_dao = db::group::Dao::new(&db_thread_pool);
        group_dao.get_members(group_id)
    })
    .await?
    {
        Ok(m) => m,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError("Failed to get members"));
        }
    };

    let member_dtos = members
        .into_iter()
        .map(OutputGroupMember::from)
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(member_dtos))
}
