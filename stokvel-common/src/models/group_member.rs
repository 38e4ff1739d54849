use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};

use crate::models::stokvel_group::StokvelGroup;
use crate::models::user::User;
use crate::schema::group_members;

#[derive(
    Debug, Clone, Serialize, Deserialize, Identifiable, Associations, Queryable, QueryableByName,
)]
#[diesel(table_name = group_members)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(StokvelGroup, foreign_key = stokvel_group_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GroupMember {
    pub id: i32,
    pub user_id: i32,
    pub stokvel_group_id: i32,
    pub role: String,
    pub is_active: bool,
    pub joined_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = group_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewGroupMember<'a> {
    pub user_id: i32,
    pub stokvel_group_id: i32,
    pub role: &'a str,
    pub is_active: bool,
    pub joined_at: NaiveDateTime,
}
