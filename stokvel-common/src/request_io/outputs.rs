use chrono::NaiveDateTime;
use serde::Serialize;

use crate::db::meeting::MeetingWithInvitees;
use crate::models::group_member::GroupMember;
use crate::models::user::User;

#[derive(Debug, Serialize)]
pub struct OutputMessage {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMeetingId {
    pub message: &'static str,
    pub meeting_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSeriesDeleted {
    pub message: &'static str,
    pub deleted_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputUserId {
    pub message: &'static str,
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputGroupId {
    pub message: &'static str,
    pub group_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOrganizer {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputInvitedUser {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub invite_status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMeeting {
    pub id: i32,
    pub title: String,
    pub agenda: Option<String>,
    pub organizer: OutputOrganizer,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub status: &'static str,
    pub recurrence: String,
    pub recurrence_end_date: Option<NaiveDateTime>,
    pub recurrence_group_id: Option<String>,
    pub invited_users: Vec<OutputInvitedUser>,
}

impl From<MeetingWithInvitees> for OutputMeeting {
    fn from(expanded: MeetingWithInvitees) -> Self {
        let MeetingWithInvitees {
            meeting,
            organizer,
            invitees,
        } = expanded;

        let invited_users = invitees
            .into_iter()
            .map(|(meeting_user, user)| OutputInvitedUser {
                id: user.id,
                name: user.name,
                surname: user.surname,
                email: user.email,
                invite_status: meeting_user.invite_status.as_str(),
            })
            .collect();

        OutputMeeting {
            id: meeting.id,
            title: meeting.title,
            agenda: meeting.agenda,
            organizer: OutputOrganizer {
                id: organizer.id,
                name: organizer.name,
                surname: organizer.surname,
                email: organizer.email,
            },
            start: meeting.start_datetime,
            end: meeting.end_datetime,
            created_at: meeting.created_at,
            status: meeting.status.as_str(),
            recurrence: meeting.recurrence,
            recurrence_end_date: meeting.recurrence_end_date,
            recurrence_group_id: meeting.recurrence_group_id,
            invited_users,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputUser {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    pub profile_image_url: Option<String>,
    pub language_preference: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for OutputUser {
    fn from(user: User) -> Self {
        OutputUser {
            id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            phone_number: user.phone_number,
            profile_image_url: user.profile_image_url,
            language_preference: user.language_preference,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputGroupMember {
    pub user_id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub joined_at: NaiveDateTime,
}

impl From<(GroupMember, User)> for OutputGroupMember {
    fn from((member, user): (GroupMember, User)) -> Self {
        OutputGroupMember {
            user_id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            role: member.role,
            is_active: member.is_active,
            joined_at: member.joined_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meeting::{Meeting, MeetingStatus};
    use crate::models::meeting_user::{InviteStatus, MeetingUser};
    use chrono::NaiveDate;

    fn test_user(id: i32, name: &str) -> User {
        User {
            id,
            name: String::from(name),
            surname: String::from("Dlamini"),
            email: format!("{}@stokvel.test", name.to_lowercase()),
            phone_number: String::from("0820000000"),
            profile_image_url: None,
            language_preference: String::from("English"),
            created_at: NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn meeting_dto_serializes_with_camel_case_keys() {
        let start = NaiveDate::from_ymd_opt(2026, 9, 7)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();

        let meeting = Meeting {
            id: 42,
            title: String::from("Weekly check-in"),
            agenda: None,
            organizer_id: 1,
            start_datetime: start,
            end_datetime: start + chrono::Duration::hours(1),
            created_at: start - chrono::Duration::days(3),
            status: MeetingStatus::Scheduled,
            recurrence: String::from("Weekly"),
            recurrence_end_date: None,
            recurrence_group_id: Some(String::from("grp-1")),
            location: None,
            notes: None,
        };

        let organizer = test_user(1, "Thandi");
        let invitee = test_user(2, "Sipho");

        let expanded = MeetingWithInvitees {
            meeting,
            organizer,
            invitees: vec![(
                MeetingUser {
                    meeting_id: 42,
                    user_id: 2,
                    invite_status: InviteStatus::Pending,
                    attended: false,
                    response_status: None,
                },
                invitee,
            )],
        };

        let serialized = serde_json::to_value(OutputMeeting::from(expanded)).unwrap();

        assert_eq!(serialized["id"], 42);
        assert_eq!(serialized["status"], "Scheduled");
        assert_eq!(serialized["recurrenceGroupId"], "grp-1");
        assert_eq!(serialized["createdAt"], "2026-09-04T18:00:00");
        assert_eq!(serialized["organizer"]["surname"], "Dlamini");
        assert!(serialized["organizer"].get("inviteStatus").is_none());
        assert_eq!(serialized["invitedUsers"][0]["inviteStatus"], "Pending");
        assert_eq!(serialized["invitedUsers"][0]["id"], 2);
    }

    #[test]
    fn series_deleted_dto_uses_camel_case_count_key() {
        let serialized = serde_json::to_value(OutputSeriesDeleted {
            message: "Meeting series deleted.",
            deleted_count: 2,
        })
        .unwrap();

        assert_eq!(serialized["deletedCount"], 2);
    }
}
