use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

use crate::models::meeting::Meeting;
use crate::models::user::User;
use crate::models::UnknownStatus;
use crate::schema::meeting_users;

/// Per-user response state to a meeting invitation. The transition
/// graph is deliberately fully connected: any status may be
/// overwritten with any other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "Pending",
            InviteStatus::Accepted => "Accepted",
            InviteStatus::Declined => "Declined",
            InviteStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for InviteStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pending") {
            Ok(InviteStatus::Pending)
        } else if s.eq_ignore_ascii_case("accepted") {
            Ok(InviteStatus::Accepted)
        } else if s.eq_ignore_ascii_case("declined") {
            Ok(InviteStatus::Declined)
        } else if s.eq_ignore_ascii_case("cancelled") {
            Ok(InviteStatus::Cancelled)
        } else {
            Err(UnknownStatus)
        }
    }
}

impl ToSql<Text, Pg> for InviteStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for InviteStatus {
    fn from_sql(value: PgValue) -> deserialize::Result<Self> {
        match value.as_bytes() {
            b"Pending" => Ok(InviteStatus::Pending),
            b"Accepted" => Ok(InviteStatus::Accepted),
            b"Declined" => Ok(InviteStatus::Declined),
            b"Cancelled" => Ok(InviteStatus::Cancelled),
            other => Err(format!(
                "Unrecognized invite status: {}",
                String::from_utf8_lossy(other)
            )
            .into()),
        }
    }
}

#[derive(Debug, Clone, Identifiable, Associations, Queryable, QueryableByName)]
#[diesel(table_name = meeting_users)]
#[diesel(primary_key(meeting_id, user_id))]
#[diesel(belongs_to(Meeting, foreign_key = meeting_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MeetingUser {
    pub meeting_id: i32,
    pub user_id: i32,
    pub invite_status: InviteStatus,
    pub attended: bool,
    pub response_status: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = meeting_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMeetingUser {
    pub meeting_id: i32,
    pub user_id: i32,
    pub invite_status: InviteStatus,
    pub attended: bool,
}
