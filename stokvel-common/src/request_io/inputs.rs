use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct InputOrganizer {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMeeting {
    pub title: String,
    pub agenda: Option<String>,
    pub organizer: InputOrganizer,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub recurrence: Option<String>,
    pub recurrence_end_date: Option<NaiveDateTime>,
    pub recurrence_group_id: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub invited_user_ids: Option<Vec<i32>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputInviteStatusUpdate {
    pub meeting_id: i32,
    pub user_id: i32,
    pub invite_status: String,
}

/// Query parameters for the meeting listing. `user_id` stays a string
/// here: a value that fails to parse as an integer drops the filter
/// instead of rejecting the request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMeetingFilters {
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<NaiveDateTime>,
    pub date_to: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    pub profile_image_url: Option<String>,
    pub language_preference: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputGroup {
    pub group_name: String,
    pub description: Option<String>,
    pub stokvel_type: Option<String>,
    pub monthly_contribution_cents: Option<i64>,
    pub created_by_user_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputGroupMember {
    pub group_id: i32,
    pub user_id: i32,
    pub role: Option<String>,
}
