use chrono::Utc;
use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};

use crate::db::{DaoError, DbThreadPool};
use crate::models::group_member::{GroupMember, NewGroupMember};
use crate::models::stokvel_group::NewStokvelGroup;
use crate::models::user::User;
use crate::schema::group_members as group_member_fields;
use crate::schema::group_members::dsl::group_members;
use crate::schema::stokvel_groups as stokvel_group_fields;
use crate::schema::stokvel_groups::dsl::stokvel_groups;
use crate::schema::users as user_fields;
use crate::schema::users::dsl::users;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    /// Creates a group and enrolls its creator as the first (active)
    /// member in one transaction.
    pub fn create_group(
        &self,
        group_name: &str,
        description: &str,
        stokvel_type: &str,
        monthly_contribution_cents: i64,
        created_by_user_id: i32,
    ) -> Result<i32, DaoError> {
        let current_time = Utc::now().naive_utc();

        let new_group = NewStokvelGroup {
            group_name,
            description,
            stokvel_type,
            monthly_contribution_cents,
            created_by_user_id,
            created_at: current_time,
        };

        let mut db_connection = self.db_thread_pool.get()?;

        db_connection
            .build_transaction()
            .run::<_, DaoError, _>(|conn| {
                let creator_exists = dsl::select(dsl::exists(
                    users.filter(user_fields::id.eq(created_by_user_id)),
                ))
                .get_result::<bool>(conn)?;

                if !creator_exists {
                    return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
                }

                let group_id = dsl::insert_into(stokvel_groups)
                    .values(&new_group)
                    .returning(stokvel_group_fields::id)
                    .get_result::<i32>(conn)?;

                let creator_membership = NewGroupMember {
                    user_id: created_by_user_id,
                    stokvel_group_id: group_id,
                    role: "Chairperson",
                    is_active: true,
                    joined_at: current_time,
                };

                dsl::insert_into(group_members)
                    .values(&creator_membership)
                    .execute(conn)?;

                Ok(group_id)
            })
    }

    pub fn add_member(
        &self,
        stokvel_group_id: i32,
        user_id: i32,
        role: &str,
    ) -> Result<(), DaoError> {
        let new_member = NewGroupMember {
            user_id,
            stokvel_group_id,
            role,
            is_active: true,
            joined_at: Utc::now().naive_utc(),
        };

        let mut db_connection = self.db_thread_pool.get()?;

        db_connection
            .build_transaction()
            .run::<_, DaoError, _>(|conn| {
                let user_exists = dsl::select(dsl::exists(
                    users.filter(user_fields::id.eq(user_id)),
                ))
                .get_result::<bool>(conn)?;

                let group_exists = dsl::select(dsl::exists(
                    stokvel_groups.filter(stokvel_group_fields::id.eq(stokvel_group_id)),
                ))
                .get_result::<bool>(conn)?;

                if !user_exists || !group_exists {
                    return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
                }

                dsl::insert_into(group_members)
                    .values(&new_member)
                    .execute(conn)?;

                Ok(())
            })
    }

    pub fn get_members(
        &self,
        stokvel_group_id: i32,
    ) -> Result<Vec<(GroupMember, User)>, DaoError> {
        Ok(group_members
            .inner_join(users)
            .filter(group_member_fields::stokvel_group_id.eq(stokvel_group_id))
            .order(group_member_fields::joined_at.asc())
            .load::<(GroupMember, User)>(&mut self.db_thread_pool.get()?)?)
    }
}
