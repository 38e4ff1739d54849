use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};

use crate::schema::stokvel_groups;

#[derive(Debug, Clone, Serialize, Deserialize, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = stokvel_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StokvelGroup {
    pub id: i32,
    pub group_name: String,
    pub description: String,
    pub stokvel_type: String,
    pub monthly_contribution_cents: i64,
    pub created_by_user_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = stokvel_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewStokvelGroup<'a> {
    pub group_name: &'a str,
    pub description: &'a str,
    pub stokvel_type: &'a str,
    pub monthly_contribution_cents: i64,
    pub created_by_user_id: i32,
    pub created_at: NaiveDateTime,
}
