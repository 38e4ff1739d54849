use chrono::NaiveDateTime;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

use crate::models::UnknownStatus;
use crate::schema::meetings;

/// Overall state of a meeting. Transitions only move forward: a
/// cancelled meeting never becomes scheduled again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum MeetingStatus {
    Scheduled,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "Scheduled",
            MeetingStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for MeetingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("scheduled") {
            Ok(MeetingStatus::Scheduled)
        } else if s.eq_ignore_ascii_case("cancelled") {
            Ok(MeetingStatus::Cancelled)
        } else {
            Err(UnknownStatus)
        }
    }
}

impl ToSql<Text, Pg> for MeetingStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for MeetingStatus {
    fn from_sql(value: PgValue) -> deserialize::Result<Self> {
        match value.as_bytes() {
            b"Scheduled" => Ok(MeetingStatus::Scheduled),
            b"Cancelled" => Ok(MeetingStatus::Cancelled),
            other => Err(format!(
                "Unrecognized meeting status: {}",
                String::from_utf8_lossy(other)
            )
            .into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = meetings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Meeting {
    pub id: i32,
    pub title: String,
    pub agenda: Option<String>,
    pub organizer_id: i32,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub status: MeetingStatus,
    pub recurrence: String,
    pub recurrence_end_date: Option<NaiveDateTime>,
    pub recurrence_group_id: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = meetings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMeeting<'a> {
    pub title: &'a str,
    pub agenda: Option<&'a str>,
    pub organizer_id: i32,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub status: MeetingStatus,
    pub recurrence: &'a str,
    pub recurrence_end_date: Option<NaiveDateTime>,
    pub recurrence_group_id: Option<&'a str>,
    pub location: Option<&'a str>,
    pub notes: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_status_parses_case_insensitively() {
        assert_eq!(
            MeetingStatus::from_str("scheduled").unwrap(),
            MeetingStatus::Scheduled
        );
        assert_eq!(
            MeetingStatus::from_str("CANCELLED").unwrap(),
            MeetingStatus::Cancelled
        );
        assert_eq!(
            MeetingStatus::from_str("Scheduled").unwrap(),
            MeetingStatus::Scheduled
        );
    }

    #[test]
    fn meeting_status_rejects_unknown_values() {
        assert!(MeetingStatus::from_str("postponed").is_err());
        assert!(MeetingStatus::from_str("").is_err());
    }
}
